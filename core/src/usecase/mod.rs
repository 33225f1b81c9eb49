pub mod daily_playbook;

pub use daily_playbook::DailyPlaybookUseCase;
