use super::*;

/// Root comments in chronological order, each carrying its replies.
pub type CommentForest = Vec<Arc<Comment>>;

/// A comment thread assembled from flat records, with lookup by id.
///
/// Every comment is stored once and shared between its parent's `children`
/// and the id lookup, so [`CommentIndex::get`] is a single hash lookup and
/// hands out the comment together with its replies.
#[derive(Clone, Debug, Default)]
pub struct CommentIndex {
  comments: HashMap<String, Arc<Comment>>,
  roots: CommentForest,
}

impl CommentIndex {
  /// Builds replies before their parents with an explicit stack, so thread
  /// depth is bounded by memory rather than by the call stack.
  fn assemble(
    unique: Vec<Comment>,
    roots: &[usize],
    children: &[Vec<usize>],
  ) -> Self {
    let mut slots = unique.into_iter().map(Some).collect::<Vec<_>>();
    let mut built = vec![None::<Arc<Comment>>; slots.len()];
    let mut comments = HashMap::with_capacity(slots.len());

    let mut stack = roots
      .iter()
      .map(|&position| (position, false))
      .collect::<Vec<_>>();

    while let Some((position, expanded)) = stack.pop() {
      if !expanded {
        stack.push((position, true));
        stack.extend(children[position].iter().map(|&child| (child, false)));
        continue;
      }

      let Some(mut comment) = slots[position].take() else {
        continue;
      };

      comment.children = children[position]
        .iter()
        .filter_map(|&child| built[child].take())
        .collect();

      let comment = Arc::new(comment);

      comments.insert(comment.id.clone(), Arc::clone(&comment));
      built[position] = Some(comment);
    }

    Self {
      comments,
      roots: roots
        .iter()
        .filter_map(|&position| built[position].take())
        .collect(),
    }
  }

  /// Sorts `comments` by submission time and nests replies under their
  /// parents.
  ///
  /// The sort is stable, so comments with equal timestamps keep their input
  /// order. Sibling order follows from the single up-front sort. Comments
  /// whose parent is missing, and comments caught in a parent cycle, are
  /// handled according to `policy`. Later duplicates of an id are dropped.
  pub fn build(
    mut comments: Vec<Comment>,
    policy: OrphanPolicy,
  ) -> Result<Self> {
    comments.sort_by_key(|comment| comment.submitted_at);

    let mut positions = HashMap::with_capacity(comments.len());
    let mut unique = Vec::with_capacity(comments.len());

    for mut comment in comments {
      if positions.contains_key(&comment.id) {
        tracing::warn!(id = %comment.id, "dropping duplicate comment");
        continue;
      }

      comment.children.clear();
      positions.insert(comment.id.clone(), unique.len());
      unique.push(comment);
    }

    let mut parents = vec![None; unique.len()];
    let mut roots = Vec::new();

    for (position, comment) in unique.iter().enumerate() {
      match &comment.parent_id {
        None => roots.push(position),
        Some(parent_id) => match positions.get(parent_id) {
          Some(&parent) if parent != position => {
            parents[position] = Some(parent);
          }
          _ => Self::orphan(position, comment, policy, &mut roots)?,
        },
      }
    }

    // Parent cycles never hang off a root. Detach the earliest comment on
    // each cycle and the rest of it follows as its replies.
    for position in Self::cycle_breaks(&parents) {
      parents[position] = None;
      Self::orphan(position, &unique[position], policy, &mut roots)?;
    }

    roots.sort_unstable();

    let mut children = vec![Vec::new(); unique.len()];

    for (position, parent) in parents.iter().enumerate() {
      if let Some(parent) = *parent {
        children[parent].push(position);
      }
    }

    let index = Self::assemble(unique, &roots, &children);

    tracing::info!(
      comments = index.len(),
      roots = index.roots.len(),
      "assembled comment thread"
    );

    Ok(index)
  }

  #[must_use]
  pub fn contains(&self, id: &str) -> bool {
    self.comments.contains_key(id)
  }

  /// The earliest comment on every parent cycle.
  ///
  /// Each walk follows parent links until it reaches a comment already known
  /// to lead to a root, or one already on the walk. Only the second case is
  /// a cycle, and only the comments from that repeat onward are on it.
  fn cycle_breaks(parents: &[Option<usize>]) -> Vec<usize> {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
      Rooted,
      Unvisited,
      Walking,
    }

    let mut state = vec![State::Unvisited; parents.len()];
    let mut breaks = Vec::new();
    let mut walk = Vec::new();

    for start in 0..parents.len() {
      let mut current = Some(start);

      while let Some(position) = current {
        match state[position] {
          State::Rooted => break,
          State::Walking => {
            if let Some(begin) = walk.iter().position(|&p| p == position)
              && let Some(&earliest) = walk[begin..].iter().min()
            {
              breaks.push(earliest);
            }
            break;
          }
          State::Unvisited => {
            state[position] = State::Walking;
            walk.push(position);
            current = parents[position];
          }
        }
      }

      for position in walk.drain(..) {
        state[position] = State::Rooted;
      }
    }

    breaks.sort_unstable();
    breaks
  }

  #[must_use]
  pub fn get(&self, id: &str) -> Option<&Comment> {
    self.comments.get(id).map(AsRef::as_ref)
  }

  #[must_use]
  pub fn into_forest(self) -> CommentForest {
    self.roots
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.comments.is_empty()
  }

  /// Every comment, parents before their replies.
  pub fn iter(&self) -> impl Iterator<Item = &Comment> {
    let mut stack = self.roots.iter().rev().collect::<Vec<_>>();

    std::iter::from_fn(move || {
      let comment = stack.pop()?;
      stack.extend(comment.children.iter().rev());
      Some(comment.as_ref())
    })
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.comments.len()
  }

  fn orphan(
    position: usize,
    comment: &Comment,
    policy: OrphanPolicy,
    roots: &mut Vec<usize>,
  ) -> Result {
    let parent_id = comment.parent_id.clone().unwrap_or_default();

    match policy {
      OrphanPolicy::Reject => Err(Error::DanglingReference {
        id: comment.id.clone(),
        parent_id,
      }),
      OrphanPolicy::Promote => {
        tracing::warn!(
          id = %comment.id,
          parent_id = %parent_id,
          "promoting comment with unreachable parent to root"
        );

        roots.push(position);

        Ok(())
      }
    }
  }

  #[must_use]
  pub fn roots(&self) -> &[Arc<Comment>] {
    &self.roots
  }
}
