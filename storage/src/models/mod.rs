mod telegram_user;

pub use telegram_user::TelegramUserRecord;
