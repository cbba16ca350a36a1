use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::model::Comment;

/// Deepest nesting level produced by [`build_reply_forest`].
///
/// Replies below this level are attached next to their parent instead of
/// under it; their `parent_id` still names the real parent. This keeps the
/// recursive serializer within a bounded stack for any chain length.
pub const MAX_THREAD_DEPTH: usize = 64;

/// A comment together with its (transitively nested) replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    fn leaf(comment: Comment) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }

    /// Number of comments in this subtree, including this one.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.replies.iter());
        }
        count
    }

    /// Height of this subtree. A comment without replies has depth 1.
    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.replies.iter().map(|reply| (reply, depth + 1)));
        }
        deepest
    }
}

impl Drop for CommentNode {
    // Flattens the subtree first so dropping a long chain never recurses.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.replies);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.replies);
        }
    }
}

/// Splits a flat comment list by post, preserving the input order per post.
pub fn group_by_post(comments: Vec<Comment>) -> BTreeMap<i64, Vec<Comment>> {
    let mut grouped: BTreeMap<i64, Vec<Comment>> = BTreeMap::new();

    for comment in comments {
        grouped.entry(comment.post_id).or_default().push(comment);
    }

    grouped
}

/// Threads a flat list of comments into a forest, roots and replies ordered by ID.
///
/// Runs without recursion, so arbitrarily long reply chains are fine. A reply
/// whose parent is not in `comments` is promoted to a root rather than
/// dropped. Nesting stops at [`MAX_THREAD_DEPTH`]; deeper replies become
/// siblings of their parent at that level.
///
/// Parents always have a smaller ID than their replies because a parent must
/// exist when the reply is created. Walking IDs upwards therefore sees every
/// parent before its replies, and walking them downwards finishes every
/// subtree before it is attached.
pub fn build_reply_forest(comments: Vec<Comment>) -> Vec<CommentNode> {
    let mut pending: BTreeMap<i64, CommentNode> = comments
        .into_iter()
        .map(|comment| (comment.id, CommentNode::leaf(comment)))
        .collect();

    // comment ID -> (node it hangs under, its level)
    let mut placement: HashMap<i64, (Option<i64>, usize)> = HashMap::with_capacity(pending.len());
    for (&id, node) in &pending {
        let parent = node
            .comment
            .parent_id
            .and_then(|parent_id| placement.get(&parent_id).map(|&p| (parent_id, p)));

        let slot = match parent {
            None => (None, 1),
            Some((parent_id, (_, level))) if level < MAX_THREAD_DEPTH => {
                (Some(parent_id), level + 1)
            }
            Some((_, (anchor, level))) => (anchor, level),
        };
        placement.insert(id, slot);
    }

    let mut roots = Vec::new();

    while let Some((id, mut node)) = pending.pop_last() {
        // Replies were pushed highest ID first.
        node.replies.reverse();

        let anchor = placement
            .get(&id)
            .and_then(|&(anchor, _)| anchor)
            .and_then(|anchor| pending.get_mut(&anchor));

        match anchor {
            Some(anchor) => anchor.replies.push(node),
            None => roots.push(node),
        }
    }

    roots.reverse();
    roots
}

/// Groups a batch of comments by post and threads each group.
pub fn build_forests(comments: Vec<Comment>) -> BTreeMap<i64, Vec<CommentNode>> {
    group_by_post(comments)
        .into_iter()
        .map(|(post_id, comments)| (post_id, build_reply_forest(comments)))
        .collect()
}
