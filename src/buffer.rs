use std::ops::Range;

/// A window over a set of equally long channel slices, processed in place.
pub struct AudioBlock<'a, 'b> {
    channels: &'a mut [&'b mut [f32]],
    offset: usize,
    len: usize,
}

impl<'a, 'b> AudioBlock<'a, 'b> {
    /// Wraps `channels`. The block is as long as the shortest channel.
    pub fn new(channels: &'a mut [&'b mut [f32]]) -> AudioBlock<'a, 'b> {
        let len = channels.iter().map(|channel| channel.len()).min().unwrap_or(0);

        AudioBlock {
            channels,
            offset: 0,
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index][self.offset..self.offset + self.len]
    }

    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index][self.offset..self.offset + self.len]
    }

    /// Reborrows a sub-range of the block. Returns `None` if `range` is out
    /// of bounds.
    #[inline]
    pub fn slice(&mut self, range: Range<usize>) -> Option<AudioBlock<'_, 'b>> {
        if range.start > range.end || range.end > self.len {
            None
        } else {
            Some(AudioBlock {
                channels: &mut *self.channels,
                offset: self.offset + range.start,
                len: range.end - range.start,
            })
        }
    }

    #[inline]
    pub fn clear_channel(&mut self, index: usize) {
        self.channel_mut(index).fill(0.0);
    }

    #[inline]
    pub fn multiply_channel(&mut self, index: usize, factor: f32) {
        for sample in self.channel_mut(index) {
            *sample *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_channel_sets_length() {
        let mut left = [1.0; 4];
        let mut right = [1.0; 3];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];

        let block = AudioBlock::new(&mut channels);
        assert_eq!(block.len(), 3);
        assert_eq!(block.channel_count(), 2);

        let mut none: [&mut [f32]; 0] = [];
        assert!(AudioBlock::new(&mut none).is_empty());
    }

    #[test]
    fn slice() {
        let mut left = [1.0, 2.0, 3.0, 4.0];
        let mut right = [5.0, 6.0, 7.0, 8.0];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        let mut block = AudioBlock::new(&mut channels);

        assert!(block.slice(3..5).is_none());

        let mut middle = block.slice(1..3).unwrap();
        assert_eq!(middle.channel(1), &[6.0, 7.0]);
        middle.multiply_channel(0, 10.0);
        middle.clear_channel(1);

        let mut tail = middle.slice(1..2).unwrap();
        for index in 0..tail.channel_count() {
            tail.channel_mut(index)[0] += 0.5;
        }

        assert_eq!(left, [1.0, 20.0, 30.5, 4.0]);
        assert_eq!(right, [5.0, 0.0, 0.5, 8.0]);
    }
}
