//! Clickable line list: renders like a `Paragraph` body and registers one
//! click target per clickable line at whatever row it lands on.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;
use ratzilla::ratatui::widgets::Block;

use crate::input::ClickState;

/// Pairs rendered [`Line`]s with click actions.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("header"));
/// cl.push_clickable(Line::from(" [1] 공격"), CHOICE_BASE);
/// cl.register_targets_with_block(area, &block, &mut cs, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line bound to `action_id`. The binding follows the line if
    /// lines are inserted before it.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines.
    ///
    /// * `top_offset` / `bottom_offset`: rows taken by borders.
    /// * `scroll`: vertical scroll in visual rows.
    /// * `inner_width`: content width when the paragraph wraps, `0` when it
    ///   does not (one logical line per row).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        let mut visual_starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut visual_heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            visual_starts.push(cumulative);
            let h = match inner_width as usize {
                0 => 1,
                w if line.width() <= w => 1,
                w => line.width().div_ceil(w) as u16,
            };
            visual_heights.push(h);
            cumulative += h;
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            let (Some(&vstart), Some(&vheight)) = (visual_starts.get(li), visual_heights.get(li)) else {
                continue;
            };
            for vr in vstart..vstart + vheight {
                if vr < scroll {
                    continue;
                }
                let screen_row = content_y + (vr - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }

    /// Same as [`register_targets`](Self::register_targets) with offsets and
    /// wrap width taken from the block that will wrap the list.
    pub fn register_targets_with_block(
        &self,
        area: Rect,
        block: &Block,
        cs: &mut ClickState,
        scroll: u16,
    ) {
        let inner = block.inner(area);
        let top = inner.y.saturating_sub(area.y);
        let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
        self.register_targets(area, cs, top, bottom, scroll, inner.width);
    }
}
