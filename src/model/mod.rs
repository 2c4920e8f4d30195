pub mod absence_entry;
pub mod telegram_response;
