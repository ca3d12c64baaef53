//! Trades module - options trade models, lifecycle, and service trait.

mod trades_model;
mod trades_traits;

#[cfg(test)]
mod trades_model_tests;

// Re-export the public interface
pub use trades_model::{
    are_actions_paired, is_closing_action, is_opening_action, valid_close_action, validate_leg,
    CloseTrade, ClosingAction, NewTrade, OpeningAction, OptionType, PositionDirection, Trade,
    TradeStatus, TradeUpdate,
};
pub use trades_traits::TradeServiceTrait;
