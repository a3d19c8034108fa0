pub mod sample_repo;

pub use sample_repo::SampleRepo;
