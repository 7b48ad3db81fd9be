mod store;

pub use store::FsImageStore;
