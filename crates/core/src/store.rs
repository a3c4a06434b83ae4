use crate::types::Post;

/// Read-only, ordered collection of posts.
///
/// Built once and handed by reference to whatever needs to read it. Lookups are
/// a linear scan where the first matching id wins; duplicate ids are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// The built-in store used when no site config is supplied
    pub fn seed() -> Self {
        Self::new(vec![Post::new("1", "First post")])
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Ids that occur more than once, in order of their second appearance
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (i, post) in self.posts.iter().enumerate() {
            let seen_before = self.posts[..i].iter().any(|p| p.id == post.id);
            if seen_before && !duplicates.contains(&post.id.as_str()) {
                duplicates.push(&post.id);
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_store() {
        let store = PostStore::seed();
        assert_eq!(store.len(), 1);
        assert_eq!(store.posts()[0], Post::new("1", "First post"));
    }

    #[test]
    fn test_find_returns_first_match() {
        let store = PostStore::new(vec![
            Post::new("a", "Alpha"),
            Post::new("b", "Beta"),
            Post::new("a", "Alpha again"),
        ]);
        assert_eq!(store.find("a").unwrap().title, "Alpha");
        assert_eq!(store.find("b").unwrap().title, "Beta");
        assert!(store.find("c").is_none());
    }

    #[test]
    fn test_duplicate_ids() {
        let store = PostStore::new(vec![
            Post::new("a", "1"),
            Post::new("b", "2"),
            Post::new("a", "3"),
            Post::new("a", "4"),
        ]);
        assert_eq!(store.duplicate_ids(), vec!["a"]);
        assert!(PostStore::seed().duplicate_ids().is_empty());
    }

    #[test]
    fn test_empty_store() {
        let store = PostStore::default();
        assert!(store.is_empty());
        assert!(store.find("1").is_none());
    }
}
