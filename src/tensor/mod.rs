/// Unsigned 8-bit activation grid.
mod grid_u8;
/// Signed 32-bit accumulator grid.
mod grid_i32;

pub use grid_i32::GridI32;
pub use grid_u8::GridU8;
