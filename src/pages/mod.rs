pub mod artwork;
pub mod daily;
pub mod gallery;
pub mod graph;
pub mod home;
pub mod not_found;
pub mod search;
pub mod wallpapers;
