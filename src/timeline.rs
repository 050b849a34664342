//! Nested phase-timing recorder, pure bookkeeping with no effect on build
//! semantics.

use std::time::Instant;

/// One timed phase of the build, possibly containing nested phases.
#[derive(Debug, Clone)]
pub struct Phase {
    pub tag: String,
    pub start: Instant,
    pub end: Instant,
    pub children: Vec<Phase>,
}

impl Phase {
    pub fn duration(&self) -> std::time::Duration {
        self.end.duration_since(self.start)
    }

    /// Renders this phase and its children as `<percent>% - <tag>` lines,
    /// each child indented one level further than its parent. `percent` is
    /// the phase's share of `parent_duration`, truncated toward zero.
    fn render_into(&self, out: &mut String, depth: usize, parent_duration: std::time::Duration) {
        let percent = if parent_duration.is_zero() {
            100
        } else {
            (100 * self.duration().as_nanos() / parent_duration.as_nanos().max(1)) as u64
        };
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{percent}% - {}\n", self.tag));
        for child in &self.children {
            child.render_into(out, depth + 1, self.duration());
        }
    }
}

/// Records a tree of timed phases. The root call (typically wrapping the
/// entire build) seeds the tree; every nested `phase` call while a recording
/// is in progress attaches as a child of whatever phase is currently active.
#[derive(Debug, Default)]
pub struct Timeline {
    stack: Vec<Phase>,
    root: Option<Phase>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `task`, recording it as a phase tagged `tag`. If called while
    /// another `phase` call is active (i.e. reentrant, via the same
    /// `Timeline`), the new phase nests under it.
    pub fn phase<R>(&mut self, tag: impl Into<String>, task: impl FnOnce(&mut Self) -> R) -> R {
        let start = Instant::now();
        self.stack.push(Phase { tag: tag.into(), start, end: start, children: Vec::new() });

        let result = task(self);

        let mut finished = self.stack.pop().expect("phase pushed above");
        finished.end = Instant::now();

        match self.stack.last_mut() {
            Some(parent) => parent.children.push(finished),
            None => self.root = Some(finished),
        }

        result
    }

    /// The completed root phase, if a top-level `phase` call has returned.
    pub fn root(&self) -> Option<&Phase> {
        self.root.as_ref()
    }

    /// Renders the recorded tree, or an empty string if no phase has
    /// completed yet.
    pub fn render(&self) -> String {
        match &self.root {
            Some(root) => {
                let mut out = String::new();
                root.render_into(&mut out, 0, root.duration());
                out
            }
            None => String::new(),
        }
    }
}
