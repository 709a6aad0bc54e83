//! Descriptores de paso de los flujos del producto.

pub mod booking;
pub mod onboarding;
