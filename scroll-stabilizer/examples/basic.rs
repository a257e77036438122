// Example: a bottom-slack stabilizer over a fixed-layout host.
use scroll_stabilizer::{
    Edge, HostError, InputVerdict, ScrollHost, Span, Stabilizer, StabilizerOptions, TargetRole,
};

/// A 400px container over 1200px of content, plus the slack spacer at the end.
struct Host {
    viewport: u32,
    content: u64,
    slack: u32,
    offset: u64,
    pinned: Option<u32>,
}

impl Host {
    fn max_offset(&self) -> u64 {
        self.content_size().unwrap_or(0).saturating_sub(u64::from(self.viewport))
    }
}

impl ScrollHost for Host {
    type Node = u32;

    fn viewport_size(&self) -> Result<u32, HostError> {
        Ok(self.pinned.map_or(self.viewport, |p| p.min(self.viewport)))
    }

    fn content_size(&self) -> Result<u64, HostError> {
        Ok(self.content + u64::from(self.slack))
    }

    fn scroll_offset(&self) -> Result<u64, HostError> {
        Ok(self.offset)
    }

    fn set_scroll_offset(&mut self, offset: u64) -> Result<u64, HostError> {
        self.offset = offset.min(self.max_offset());
        Ok(self.offset)
    }

    fn container_span(&self) -> Result<Span, HostError> {
        Ok(Span::from_len(0, u64::from(self.viewport)))
    }

    fn spacer_span(&self) -> Result<Span, HostError> {
        let start = self.content as i64 - self.offset as i64;
        Ok(Span::from_len(start, u64::from(self.slack)))
    }

    fn write_slack(&mut self, px: u32) -> Result<(), HostError> {
        self.slack = px;
        Ok(())
    }

    fn pin_max_height(&mut self, px: Option<u32>) -> Result<(), HostError> {
        self.pinned = px;
        Ok(())
    }

    fn set_scrollbar_fade(&mut self, _on: bool) -> Result<(), HostError> {
        Ok(())
    }

    fn node_offset(&self, node: &u32) -> Result<i64, HostError> {
        Ok(i64::from(*node) - self.offset as i64)
    }

    fn is_connected(&self, _node: &u32) -> bool {
        true
    }

    fn target_role(&self, _node: &u32) -> TargetRole {
        TargetRole::Content
    }

    fn anchor_for(&self, node: &u32) -> u32 {
        *node
    }
}

fn main() {
    let host = Host {
        viewport: 400,
        content: 1200,
        slack: 0,
        offset: 800,
        pinned: None,
    };
    let mut s = Stabilizer::new(host, Edge::End, StabilizerOptions::default());

    // A click near the bottom opens the slack, then the clicked control collapses 300px below it.
    s.on_pointer_down(&1000, 0);
    s.on_click(&1000, 0);
    s.host_mut().content = 900;
    println!("after click: offset={} {:?}", s.host().offset, s.snapshot());

    // The spacer is on screen: scrolling further down is refused.
    let verdict = s.on_wheel(120, 300);
    println!("wheel down: {verdict:?}");
    assert_eq!(verdict, InputVerdict::Block);

    // Scroll back up until the spacer leaves the bottom edge, then let the burst settle.
    s.on_wheel(-400, 320);
    s.host_mut().offset = 400;
    s.on_scroll(320);
    while let Some(at) = s.next_deadline() {
        s.tick(at);
    }
    println!("settled: offset={} {:?}", s.host().offset, s.snapshot());
}
