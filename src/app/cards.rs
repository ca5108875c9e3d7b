use tracing::info;

pub const DEMO_TITLES: [&str; 3] = ["Star Wars", "Avatar", "The Lion King"];

/// A card that counts clicks and can be liked.
#[derive(Debug, Clone, PartialEq)]
pub struct LikeCard {
    pub title: String,
    pub count: u32,
    pub has_liked: bool,
}

impl LikeCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            count: 0,
            has_liked: false,
        }
    }

    pub fn click(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// The heart sits inside the card, so a like is also a click.
    pub fn toggle_like(&mut self) {
        self.has_liked = !self.has_liked;
        self.log_like();
        self.click();
    }

    fn log_like(&self) {
        info!("{} has been liked: {}", self.title, self.has_liked);
    }

    /// Nothing is shown until the first click.
    pub fn count_label(&self) -> Option<String> {
        (self.count > 0).then(|| self.count.to_string())
    }

    pub fn heart(&self) -> &'static str {
        if self.has_liked { "❤️" } else { "🤍" }
    }
}

/// Builds the board, logging each card's starting like state.
pub fn demo_cards() -> Vec<LikeCard> {
    DEMO_TITLES
        .iter()
        .map(|t| {
            let card = LikeCard::new(*t);
            card.log_like();
            card
        })
        .collect()
}
