mod moka;

pub use self::moka::MokaCacheWrapper;
