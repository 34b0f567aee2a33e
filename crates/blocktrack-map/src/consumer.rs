use std::fmt;

/// A downstream pipeline stage that keeps its own view of which blocks still need reprocessing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum ConsumerClass {
    /// Euclidean signed distance field integration.
    Esdf = 0,
    Mesh = 1,
    Freespace = 2,
    LayerStreamer = 3,
}

impl ConsumerClass {
    pub const ALL: [Self; 4] = [
        Self::Esdf,
        Self::Mesh,
        Self::Freespace,
        Self::LayerStreamer,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Esdf => "esdf",
            Self::Mesh => "mesh",
            Self::Freespace => "freespace",
            Self::LayerStreamer => "layer_streamer",
        }
    }

    /// Converts a raw tag received from outside the type system.
    ///
    /// An unknown tag means the caller was built against a different set of consumer classes. There is no sane way to continue,
    /// so this logs the tag and aborts the process.
    pub fn from_tag(tag: u8) -> Self {
        match Self::try_from(tag) {
            Ok(class) => class,
            Err(e) => {
                log::error!("{}", e);
                std::process::abort()
            }
        }
    }
}

impl TryFrom<u8> for ConsumerClass {
    type Error = UnknownConsumerTag;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.tag() == tag)
            .ok_or(UnknownConsumerTag(tag))
    }
}

impl fmt::Display for ConsumerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A consumer tag that doesn't name any [`ConsumerClass`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnknownConsumerTag(pub u8);

impl fmt::Display for UnknownConsumerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "consumer class tag {} not implemented", self.0)
    }
}

impl std::error::Error for UnknownConsumerTag {}
