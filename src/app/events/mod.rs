//! DesignerIntent- und DesignerCommand-Enums für den Intent/Command-Datenfluss.

mod command;
mod intent;

pub use command::DesignerCommand;
pub use intent::DesignerIntent;
