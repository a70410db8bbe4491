use std::mem;
use std::ops::Range;

use crate::params::{ParamId, ParamValue};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event {
    /// Sample offset from the start of the block.
    pub time: i64,
    pub data: Data,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Data {
    ParamChange { id: ParamId, value: ParamValue },
}

impl Event {
    pub fn param_change(time: i64, id: ParamId, value: ParamValue) -> Event {
        Event {
            time,
            data: Data::ParamChange { id, value },
        }
    }
}

/// Splits a block of `len` samples at event timestamps. `events` must be
/// sorted by time.
#[inline]
pub fn split_at_events(len: usize, events: &[Event]) -> SplitAtEvents<'_> {
    SplitAtEvents {
        events,
        time: 0,
        len,
    }
}

/// Yields `(range, events)` pairs, where `events` take effect at the start
/// of `range`. Events at or past the end of the block come last, with an
/// empty range.
pub struct SplitAtEvents<'e> {
    events: &'e [Event],
    time: usize,
    len: usize,
}

impl<'e> Iterator for SplitAtEvents<'e> {
    type Item = (Range<usize>, &'e [Event]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.time >= self.len {
            if self.events.is_empty() {
                return None;
            }

            let events = mem::take(&mut self.events);
            return Some((self.len..self.len, events));
        }

        // Everything up to the current time applies now; the first later
        // event ends the segment.
        let mut event_count = 0;
        let mut split = self.len;
        for event in self.events {
            if event.time > self.time as i64 {
                if (event.time as u64) < self.len as u64 {
                    split = event.time as usize;
                }
                break;
            }

            event_count += 1;
        }

        let range = self.time..split;
        let (events, rest) = self.events.split_at(event_count);
        self.events = rest;
        self.time = split;

        Some((range, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(time: i64) -> Event {
        Event::param_change(time, 0, time as f64)
    }

    #[test]
    fn no_events() {
        let mut split = split_at_events(8, &[]);
        assert_eq!(split.next(), Some((0..8, &[][..])));
        assert_eq!(split.next(), None);

        assert_eq!(split_at_events(0, &[]).next(), None);
    }

    #[test]
    fn splits_at_timestamps() {
        let events = [change(-2), change(0), change(3), change(3), change(10)];
        let segments: Vec<_> = split_at_events(8, &events).collect();

        assert_eq!(
            segments,
            vec![
                (0..3, &events[0..2]),
                (3..8, &events[2..4]),
                (8..8, &events[4..5]),
            ]
        );
    }

    #[test]
    fn first_event_mid_block() {
        let events = [change(5)];
        let segments: Vec<_> = split_at_events(8, &events).collect();

        assert_eq!(segments, vec![(0..5, &events[0..0]), (5..8, &events[0..1])]);
    }
}
