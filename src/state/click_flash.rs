// Click highlight shown on the evolution view; never persisted.
use crate::model::Tree;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickFlash {
    pub side: Option<Tree>,
    /// Bumped on every click so repeated clicks on one side restart the timer.
    pub seq: u32,
}

impl ClickFlash {
    pub fn trigger(self, tree: Tree) -> Self {
        Self {
            side: Some(tree),
            seq: self.seq.wrapping_add(1),
        }
    }

    /// Clears the highlight only if no newer click happened since `seq`.
    pub fn expire(self, seq: u32) -> Self {
        if seq == self.seq {
            Self { side: None, ..self }
        } else {
            self
        }
    }

    pub fn is_active(&self, tree: Tree) -> bool {
        self.side == Some(tree)
    }
}
