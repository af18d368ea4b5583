pub mod balance_reset;
