mod card;
mod footer;
mod header;
mod main_content;
mod movie_card;
mod movie_detail;
mod search;
mod spinner;
mod trending;
#[allow(clippy::module_inception)]
mod ui;

pub use footer::instruction_text;
pub use main_content::pagination_line;
pub use movie_card::movie_card;
pub use ui::ui;
