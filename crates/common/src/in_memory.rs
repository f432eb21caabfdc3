mod wiki_space_repository;

pub use wiki_space_repository::*;
