pub mod cryptopia;
