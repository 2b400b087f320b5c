/// Scripted Window for render loop tests

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::render_loop::Window;

#[derive(Debug)]
pub struct MockWindow {
    /// Report `should_close` once this many frames were swapped
    pub close_after: u64,
    pub swaps: u64,
    pub polls: u64,
    pub size: (u32, u32),
    /// Resizes delivered one per `take_resize` call
    pub pending_resizes: VecDeque<(u32, u32)>,
    /// Fail the swap of this frame index (0-based)
    pub fail_swap_at: Option<u64>,
}

impl MockWindow {
    pub fn closing_after(frames: u64) -> Self {
        Self {
            close_after: frames,
            swaps: 0,
            polls: 0,
            size: (640, 480),
            pending_resizes: VecDeque::new(),
            fail_swap_at: None,
        }
    }

    pub fn queue_resize(&mut self, width: u32, height: u32) {
        self.pending_resizes.push_back((width, height));
    }
}

impl Window for MockWindow {
    fn should_close(&self) -> bool {
        self.swaps >= self.close_after
    }

    fn swap_buffers(&mut self) -> Result<()> {
        if self.fail_swap_at == Some(self.swaps) {
            return Err(Error::BackendError("mock swap failure".to_string()));
        }
        self.swaps += 1;
        Ok(())
    }

    fn poll_events(&mut self) {
        self.polls += 1;
    }

    fn take_resize(&mut self) -> Option<(u32, u32)> {
        let resize = self.pending_resizes.pop_front();
        if let Some(size) = resize {
            self.size = size;
        }
        resize
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.size
    }
}
