use std::sync::Arc;

use bank::Bank;

use super::{config::Config, database::init_bank, error::AppError};

pub struct AppState {
    pub config: Config,
    pub bank: Option<Bank>,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let bank = init_bank(&config.dataset_path);

        Self::with_bank(config, bank)
    }

    pub fn with_bank(config: Config, bank: Option<Bank>) -> Arc<Self> {
        Arc::new(Self { config, bank })
    }

    pub fn bank(&self) -> Result<&Bank, AppError> {
        self.bank.as_ref().ok_or(AppError::DatasetUnavailable)
    }
}
