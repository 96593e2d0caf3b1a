use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::Widget,
};
use std::collections::VecDeque;
use std::time::Instant;

/// Short-lived notifications shown beside the board
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Toasts {
    queue: VecDeque<Toast>,
}

impl Toasts {
    pub(crate) fn push<S: Into<String>>(&mut self, now: Instant, kind: ToastKind, message: S) {
        if self.queue.len() >= consts::MAX_TOASTS {
            let _ = self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            message: message.into(),
            kind,
            expires: now + consts::TOAST_LIFETIME,
        });
    }

    /// Discard toasts that have expired as of `now`
    pub(crate) fn prune(&mut self, now: Instant) {
        self.queue.retain(|t| t.expires > now);
    }

    /// The instant at which the oldest toast expires
    pub(crate) fn next_expiry(&self) -> Option<Instant> {
        self.queue.iter().map(|t| t.expires).min()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Renders the most recent toasts, newest on the bottom row of `area`
impl Widget for &Toasts {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = usize::from(area.height);
        let skip = self.queue.len().saturating_sub(rows);
        let shown = self.queue.len() - skip;
        let first_row = rows - shown;
        for (toast, row) in self
            .queue
            .iter()
            .skip(skip)
            .zip(area.rows().skip(first_row))
        {
            Span::styled(toast.message.as_str(), toast.kind.style()).render(row, buf);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Toast {
    message: String,
    kind: ToastKind,
    expires: Instant,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    fn style(self) -> Style {
        match self {
            ToastKind::Success => consts::TOAST_SUCCESS_STYLE,
            ToastKind::Info => consts::TOAST_INFO_STYLE,
            ToastKind::Error => consts::TOAST_ERROR_STYLE,
        }
    }
}
