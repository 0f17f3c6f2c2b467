use std::sync::Arc;

use crate::service::Aggregator;

#[derive(Debug)]
pub struct InnerState {
    pub production: bool,
    pub service: Aggregator,
}

pub type AppState = Arc<InnerState>;
