//! Positions module - equity holdings inside a portfolio.

mod positions_model;
mod positions_traits;


pub use positions_model::{
    BatchPriceUpdate, BatchPriceUpdateResponse, NewPosition, Position, PositionPriceUpdate,
    PositionUpdate, UpdatedPositionPrice,
};
pub use positions_traits::PositionServiceTrait;
