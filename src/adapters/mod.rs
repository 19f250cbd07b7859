// Adapters layer: concrete implementations of the domain ports (storage, presentation, order delivery).

pub mod presenter;
pub mod storage;
pub mod telegram;
