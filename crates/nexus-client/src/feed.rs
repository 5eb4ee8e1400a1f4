//! The campus social feed. Session-local: posts are seeded on start and are
//! not written to storage.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use nexus_shared::time::{self, rfc3339};
use nexus_shared::{AuthorRole, PostId, PostKind, UserId};
use nexus_store::User;

use crate::notify::{Notifier, StoreEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Document,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    pub author_role: AuthorRole,
    pub author_department: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: PostKind,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
    #[serde(with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub is_liked: bool,
    pub is_bookmarked: bool,
}

/// Content of a post being written.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: String,
    pub kind: PostKind,
    pub attachments: Vec<Attachment>,
    pub tags: Vec<String>,
}

/// Ordering of [`Feed::posts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFilter {
    /// Newest first.
    #[default]
    All,
    /// Most liked first, newest breaking ties.
    Trending,
    /// Only posts the viewer bookmarked, newest first.
    Bookmarked,
}

pub struct Feed {
    notifier: Notifier,
    posts: Vec<Post>,
}

impl Feed {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            posts: sample_posts(time::now()),
        }
    }

    pub fn empty(notifier: Notifier) -> Self {
        Self {
            notifier,
            posts: Vec::new(),
        }
    }

    pub fn posts(&self, filter: FeedFilter) -> Vec<&Post> {
        let mut posts: Vec<&Post> = match filter {
            FeedFilter::Bookmarked => self.posts.iter().filter(|p| p.is_bookmarked).collect(),
            _ => self.posts.iter().collect(),
        };
        match filter {
            FeedFilter::Trending => posts.sort_by(|a, b| {
                b.likes
                    .cmp(&a.likes)
                    .then_with(|| b.timestamp.cmp(&a.timestamp))
            }),
            _ => posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        }
        posts
    }

    pub fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    /// Publish a post by `author` at the top of the feed.
    pub fn create_post(&mut self, author: &User, new: NewPost) -> Post {
        let post = Post {
            id: PostId::new(),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            author_role: author.role.into(),
            author_department: author.department.clone().unwrap_or_default(),
            content: new.content,
            kind: new.kind,
            attachments: new.attachments,
            tags: new.tags,
            likes: 0,
            comments: 0,
            shares: 0,
            timestamp: time::now(),
            is_liked: false,
            is_bookmarked: false,
        };

        debug!(post_id = %post.id, author_id = %post.author_id, "post created");
        self.posts.insert(0, post.clone());
        self.notifier.publish(StoreEvent::FeedChanged);
        post
    }

    /// Flip the viewer's like, adjusting the like count.
    pub fn toggle_like(&mut self, id: &PostId) -> Option<&Post> {
        let post = self.posts.iter_mut().find(|p| &p.id == id)?;
        if post.is_liked {
            post.likes = post.likes.saturating_sub(1);
        } else {
            post.likes += 1;
        }
        post.is_liked = !post.is_liked;
        self.notifier.publish(StoreEvent::FeedChanged);
        Some(&*post)
    }

    pub fn toggle_bookmark(&mut self, id: &PostId) -> Option<&Post> {
        let post = self.posts.iter_mut().find(|p| &p.id == id)?;
        post.is_bookmarked = !post.is_bookmarked;
        self.notifier.publish(StoreEvent::FeedChanged);
        Some(&*post)
    }
}

fn sample_posts(now: DateTime<Utc>) -> Vec<Post> {
    let tags = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
    vec![
        Post {
            id: PostId::from("1"),
            author_id: UserId::from("2"),
            author_name: "Dr. Sarah Wilson".into(),
            author_role: AuthorRole::Faculty,
            author_department: "Computer Science".into(),
            content: "Excited to share that our AI research project has been accepted at NeurIPS 2024! Looking for passionate graduate students to join our team. 🚀".into(),
            kind: PostKind::Achievement,
            attachments: Vec::new(),
            tags: tags(&["AI", "Research", "NeurIPS", "Opportunity"]),
            likes: 24,
            comments: 8,
            shares: 3,
            timestamp: now - Duration::hours(2),
            is_liked: false,
            is_bookmarked: true,
        },
        Post {
            id: PostId::from("2"),
            author_id: UserId::from("6"),
            author_name: "Alex Rodriguez".into(),
            author_role: AuthorRole::Student,
            author_department: "Mechanical Engineering".into(),
            content: "Just finished building a robotic arm prototype! This project taught me so much about control systems and 3D printing.".into(),
            kind: PostKind::ProjectUpdate,
            attachments: vec![Attachment {
                kind: AttachmentKind::Image,
                url: "/api/placeholder/400/300".into(),
                title: Some("Robotic Arm Prototype".into()),
            }],
            tags: tags(&["Robotics", "3D Printing", "Engineering"]),
            likes: 18,
            comments: 12,
            shares: 2,
            timestamp: now - Duration::hours(4),
            is_liked: true,
            is_bookmarked: false,
        },
        Post {
            id: PostId::from("3"),
            author_id: UserId::from("7"),
            author_name: "Prof. Michael Kumar".into(),
            author_role: AuthorRole::Faculty,
            author_department: "Data Science".into(),
            content: "Hosting a workshop on \"Machine Learning in Healthcare\" next Friday at 2 PM in Room 205. Open to all students interested in the intersection of AI and medicine!".into(),
            kind: PostKind::Event,
            attachments: Vec::new(),
            tags: tags(&["Workshop", "Machine Learning", "Healthcare", "Open to All"]),
            likes: 31,
            comments: 15,
            shares: 7,
            timestamp: now - Duration::hours(6),
            is_liked: false,
            is_bookmarked: true,
        },
    ]
}
