use crate::config::Config;
use crate::error::{DiashowError, Result};
use crate::filter::{keep_extensions, subtract};
use crate::search::Searcher;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Sorted,
    Shuffled,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Sorted => write!(f, "sorted"),
            Order::Shuffled => write!(f, "shuffled"),
        }
    }
}

/// Lexicographically ascending copy of `paths`.
pub fn sorted(paths: &[String]) -> Vec<String> {
    let mut out = paths.to_vec();
    out.sort();
    out
}

/// Uniformly random permutation of `paths`.
pub fn shuffled<R: Rng + ?Sized>(paths: &[String], rng: &mut R) -> Vec<String> {
    let mut out = paths.to_vec();
    out.shuffle(rng);
    out
}

pub fn arrange<R: Rng + ?Sized>(paths: &[String], order: Order, rng: &mut R) -> Vec<String> {
    match order {
        Order::Sorted => sorted(paths),
        Order::Shuffled => shuffled(paths, rng),
    }
}

/// Image paths selected for one run, in final order.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    /// Search hits left after removing the negative search.
    pub results: usize,
    pub order: Order,
    pub images: Vec<String>,
}

impl Playlist {
    /// Runs the negative search, then the positive one, and builds the list.
    pub fn collect<S, R>(searcher: &S, config: &Config, pattern: &str, rng: &mut R) -> Result<Self>
    where
        S: Searcher + ?Sized,
        R: Rng + ?Sized,
    {
        let negative = searcher.search(&config.negative)?;
        debug!("Negative pattern {:?}: {} paths", config.negative, negative.len());
        let positive = searcher.search(pattern)?;
        debug!("Pattern {:?}: {} paths", pattern, positive.len());

        let filtered = subtract(positive, &negative);
        let results = filtered.len();
        let images = keep_extensions(filtered, &config.extensions);
        info!("{} results, {} images", results, images.len());

        if images.is_empty() {
            return Err(DiashowError::NoImagesFound { results });
        }

        let order = config.order();
        Ok(Self {
            results,
            order,
            images: arrange(&images, order, rng),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MockSearcher;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use std::time::Duration;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn config(shuffled: bool) -> Config {
        Config {
            negative: "kind:screenshot".to_string(),
            extensions: [".jpg", ".png"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            shuffled,
            slidesfile: PathBuf::from("/tmp/slides.json"),
            search_tool: "mdfind".to_string(),
            search_timeout: Duration::from_secs(60),
        }
    }

    fn searcher(positive: &[&str], negative: &[&str]) -> MockSearcher {
        let mut seq = Sequence::new();
        let mut mock = MockSearcher::new();
        let negative = strings(negative);
        let positive = strings(positive);
        mock.expect_search()
            .with(eq("kind:screenshot"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(negative.clone()));
        mock.expect_search()
            .with(eq("kind:image"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(positive.clone()));
        mock
    }

    #[test]
    fn sorted_mode_end_to_end() {
        let mock = searcher(&["/a/2.png", "/a/1.jpg", "/a/3.txt", "/a/bad.jpg"], &["/a/bad.jpg"]);
        let mut rng = StdRng::seed_from_u64(7);
        let playlist = Playlist::collect(&mock, &config(false), "kind:image", &mut rng).unwrap();
        assert_eq!(playlist.results, 3);
        assert_eq!(playlist.order, Order::Sorted);
        assert_eq!(playlist.images, strings(&["/a/1.jpg", "/a/2.png"]));
    }

    #[test]
    fn shuffled_mode_yields_the_actual_permutation() {
        let paths: Vec<String> = (0..20).map(|i| format!("/p/{i:02}.jpg")).collect();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let mock = searcher(&refs, &[]);
        let mut rng = StdRng::seed_from_u64(42);
        let playlist = Playlist::collect(&mock, &config(true), "kind:image", &mut rng).unwrap();

        assert_eq!(playlist.order, Order::Shuffled);
        assert_eq!(playlist.images.len(), paths.len());
        assert_eq!(sorted(&playlist.images), paths);
    }

    #[test]
    fn no_images_reports_result_count() {
        let mock = searcher(&["/a/3.txt", "/a/4.doc"], &[]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = Playlist::collect(&mock, &config(false), "kind:image", &mut rng).unwrap_err();
        assert!(matches!(err, DiashowError::NoImagesFound { results: 2 }));
    }

    #[test]
    fn negative_search_failure_stops_before_positive_search() {
        let mut mock = MockSearcher::new();
        mock.expect_search()
            .with(eq("kind:screenshot"))
            .times(1)
            .returning(|_| Err(DiashowError::Other("index offline".to_string())));
        let mut rng = StdRng::seed_from_u64(1);
        let err = Playlist::collect(&mock, &config(false), "kind:image", &mut rng).unwrap_err();
        assert!(matches!(err, DiashowError::Other(_)));
    }

    #[test]
    fn shuffle_is_pure_and_seed_dependent() {
        let paths: Vec<String> = (0..10).map(|i| format!("/{i}.jpg")).collect();
        let a = shuffled(&paths, &mut StdRng::seed_from_u64(3));
        let b = shuffled(&paths, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert_eq!(paths[0], "/0.jpg");
        assert_eq!(sorted(&a), paths);
    }

    #[test]
    fn sorted_is_byte_lexicographic() {
        let paths = strings(&["/b.jpg", "/B.jpg", "/a.jpg", "/Ä.jpg"]);
        assert_eq!(sorted(&paths), strings(&["/B.jpg", "/a.jpg", "/b.jpg", "/Ä.jpg"]));
    }
}
