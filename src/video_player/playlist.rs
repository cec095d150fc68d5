// SPDX-License-Identifier: MPL-2.0
//! Episode playlist.
//!
//! The host supplies the ordered episode list of one server; the controller
//! only moves the cursor. Switching servers swaps in another list and keeps
//! the viewer on the same episode when that list has one with the same name.

/// One playable episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Display name, e.g. "Episode 3".
    pub name: String,
    /// Stable identifier.
    pub slug: String,
    pub stream_url: String,
}

impl Episode {
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        stream_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            stream_url: stream_url.into(),
        }
    }
}

/// Ordered episodes plus the index of the one playing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    episodes: Vec<Episode>,
    current: usize,
}

impl Playlist {
    /// Creates a playlist positioned at `current`, clamped to the list.
    #[must_use]
    pub fn new(episodes: Vec<Episode>, current: usize) -> Self {
        let current = current.min(episodes.len().saturating_sub(1));
        Self { episodes, current }
    }

    /// A single-item playlist, as used for movies.
    #[must_use]
    pub fn single(episode: Episode) -> Self {
        Self::new(vec![episode], 0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    #[must_use]
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> Option<&Episode> {
        self.episodes.get(self.current)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.episodes.is_empty() && self.current < self.episodes.len() - 1
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        !self.episodes.is_empty() && self.current > 0
    }

    /// Index of the episode identified by `slug`.
    #[must_use]
    pub fn index_of(&self, slug: &str) -> Option<usize> {
        self.episodes.iter().position(|ep| ep.slug == slug)
    }

    /// Index of the first episode named `name`.
    #[must_use]
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.episodes.iter().position(|ep| ep.name == name)
    }

    /// Moves the cursor. Returns false when `index` is out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.episodes.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// One-based position and total, for an "episode n/total" label.
    ///
    /// `None` when there is nothing to navigate.
    #[must_use]
    pub fn label(&self) -> Option<(usize, usize)> {
        (self.episodes.len() > 1).then(|| (self.current + 1, self.episodes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Playlist {
        Playlist::new(
            (1..=3)
                .map(|n| {
                    Episode::new(
                        format!("Episode {n}"),
                        format!("ep-{n}"),
                        format!("https://cdn.example/ep{n}.m3u8"),
                    )
                })
                .collect(),
            0,
        )
    }

    #[test]
    fn navigation_flags_follow_cursor() {
        let mut list = three();
        assert!(!list.has_prev());
        assert!(list.has_next());

        assert!(list.set_current(2));
        assert!(list.has_prev());
        assert!(!list.has_next());
    }

    #[test]
    fn empty_playlist_has_no_neighbours() {
        let list = Playlist::default();
        assert!(!list.has_next());
        assert!(!list.has_prev());
        assert!(list.current().is_none());
        assert!(list.label().is_none());
    }

    #[test]
    fn new_clamps_out_of_range_cursor() {
        let list = Playlist::new(three().episodes().to_vec(), 10);
        assert_eq!(list.current_index(), 2);
    }

    #[test]
    fn set_current_rejects_out_of_range() {
        let mut list = three();
        assert!(!list.set_current(3));
        assert_eq!(list.current_index(), 0);
    }

    #[test]
    fn lookups_by_slug_and_name() {
        let list = three();
        assert_eq!(list.index_of("ep-2"), Some(1));
        assert_eq!(list.index_of("ep-9"), None);
        assert_eq!(list.index_of_name("Episode 3"), Some(2));
    }

    #[test]
    fn label_only_for_multiple_episodes() {
        let mut list = three();
        list.set_current(1);
        assert_eq!(list.label(), Some((2, 3)));

        let movie = Playlist::single(Episode::new("Full", "full", "https://cdn/full.m3u8"));
        assert!(movie.label().is_none());
    }
}
