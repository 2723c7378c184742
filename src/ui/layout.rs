use macroquad::prelude::Rect;

/// Axis a [`Layout`] splits along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    /// Slots side by side.
    Horizontal,
    /// Slots stacked top to bottom.
    Vertical,
}

/// Splits a rectangle into `count` equal slots handed out in order.
/// Neighbouring slots are separated by `gap`; the outer edges get none.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Split axis.
    pub orient: Orient,
    /// Area being split.
    pub rect: Rect,
    /// Number of slots.
    pub count: usize,
    /// Space between neighbouring slots.
    pub gap: f32,
    i: usize,
}

impl Layout {
    /// Fresh layout with no slot taken yet.
    pub fn new(orient: Orient, rect: Rect, count: usize, gap: f32) -> Self {
        Layout {
            orient,
            rect,
            count,
            gap,
            i: 0,
        }
    }

    /// Next slot. Panics once all `count` slots have been taken.
    pub fn slot(&mut self) -> Rect {
        assert!(self.i < self.count, "layout overflow: {} slots", self.count);

        let half = self.gap / 2.0;
        let first = self.i == 0;
        let last = self.i + 1 >= self.count;
        // Leading and trailing inset of this slot along the split axis.
        let lead = if first { 0.0 } else { half };
        let trail = if last { 0.0 } else { half };

        let n = self.count as f32;
        let i = self.i as f32;
        let r = match self.orient {
            Orient::Horizontal => {
                let w = self.rect.w / n;
                Rect::new(
                    self.rect.x + i * w + lead,
                    self.rect.y,
                    w - lead - trail,
                    self.rect.h,
                )
            }
            Orient::Vertical => {
                let h = self.rect.h / n;
                Rect::new(
                    self.rect.x,
                    self.rect.y + i * h + lead,
                    self.rect.w,
                    h - lead - trail,
                )
            }
        };
        self.i += 1;
        r
    }

    /// Slots not yet handed out.
    pub fn remaining(&self) -> usize {
        self.count - self.i
    }
}

/// Nested layouts; slots come from the innermost one.
#[derive(Debug, Default, Clone)]
pub struct LayoutStack {
    stack: Vec<Layout>,
}

impl LayoutStack {
    /// Empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a nested layout.
    pub fn push(&mut self, orient: Orient, rect: Rect, count: usize, gap: f32) {
        self.stack.push(Layout::new(orient, rect, count, gap));
    }

    /// Close the innermost layout.
    ///
    /// Panics on an empty stack.
    pub fn pop(&mut self) -> Layout {
        match self.stack.pop() {
            Some(l) => l,
            None => panic!("pop from an empty layout stack"),
        }
    }

    /// Next slot of the innermost layout.
    ///
    /// Panics on an empty stack or a full layout.
    pub fn slot(&mut self) -> Rect {
        match self.stack.last_mut() {
            Some(l) => l.slot(),
            None => panic!("slot from an empty layout stack"),
        }
    }

    /// Open layouts.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
