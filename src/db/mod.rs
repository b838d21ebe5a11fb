pub mod initialize;
pub mod migrate;
pub mod personas;
pub mod pool;
pub mod registros;
