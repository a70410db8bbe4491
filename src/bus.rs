pub const BUS_NAME: &str = "Main";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Format {
    Mono,
    Stereo,
}

impl Format {
    pub fn channel_count(&self) -> usize {
        match self {
            Format::Mono => 1,
            Format::Stereo => 2,
        }
    }
}

/// Channel formats of the main bus on either side of the plugin.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Layout {
    pub input: Format,
    pub output: Format,
}

impl Layout {
    pub const STEREO: Layout = Layout {
        input: Format::Stereo,
        output: Format::Stereo,
    };

    pub const MONO: Layout = Layout {
        input: Format::Mono,
        output: Format::Mono,
    };

    /// Input and output must match; the panner only does anything in stereo.
    pub fn is_supported(&self) -> bool {
        self.input == self.output
    }
}

impl Default for Layout {
    fn default() -> Layout {
        Layout::STEREO
    }
}

/// Supported layouts, preferred first.
pub fn layouts() -> [Layout; 2] {
    [Layout::STEREO, Layout::MONO]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_layouts() {
        for layout in layouts() {
            assert!(layout.is_supported());
        }
        assert_eq!(layouts()[0], Layout::default());

        let widening = Layout {
            input: Format::Mono,
            output: Format::Stereo,
        };
        assert!(!widening.is_supported());
    }

    #[test]
    fn channel_counts() {
        assert_eq!(Format::Mono.channel_count(), 1);
        assert_eq!(Format::Stereo.channel_count(), 2);
    }
}
