use crate::config::Config;
use crate::error::Result;
use crate::playlist::{Order, Playlist};
use crate::search::Searcher;
use crate::slides;
use log::info;
use rand::Rng;
use std::path::PathBuf;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub results: usize,
    pub images: usize,
    pub order: Order,
    pub slidesfile: PathBuf,
}

/// Collects the playlist for `pattern` and writes it to the configured slides file.
///
/// Nothing is written when no image survives the filters.
pub fn run<S, R>(pattern: &str, config: &Config, searcher: &S, rng: &mut R) -> Result<Summary>
where
    S: Searcher + ?Sized,
    R: Rng + ?Sized,
{
    let playlist = Playlist::collect(searcher, config, pattern, rng)?;
    slides::save(&playlist.images, &config.slidesfile)?;
    info!(
        "Saved {} {} slides to {}",
        playlist.images.len(),
        playlist.order,
        config.slidesfile.display()
    );

    Ok(Summary {
        results: playlist.results,
        images: playlist.images.len(),
        order: playlist.order,
        slidesfile: config.slidesfile.clone(),
    })
}
