pub mod debounce;

pub use debounce::Debounce;
