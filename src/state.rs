use crate::services::networth::NetworthEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn NetworthEngine>,
}
