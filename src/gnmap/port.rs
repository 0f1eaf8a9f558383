/// Subfield positions within a port descriptor such as `80/open/tcp//http///`.
///
/// Nmap doesn't version this layout, so every positional lookup goes through
/// [`Descriptor::subfield`] with one of these constants.
pub mod layout {
    pub const NUMBER: usize = 0;
    pub const STATE: usize = 1;
    pub const PROTOCOL: usize = 2;
    pub const OWNER: usize = 3;
    pub const SERVICE: usize = 4;
    pub const RPC_INFO: usize = 5;
    pub const VERSION: usize = 6;
}

const SUBFIELD_SEPARATOR: char = '/';

struct Descriptor<'a> {
    subfields: Vec<&'a str>,
}

impl<'a> Descriptor<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            subfields: raw.split(SUBFIELD_SEPARATOR).collect(),
        }
    }

    /// Missing subfields read as empty.
    #[inline]
    fn subfield(&self, position: usize) -> &'a str {
        self.subfields.get(position).copied().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortEntry<'a> {
    pub number: u32,
    pub state: &'a str,
    pub protocol: &'a str,
    pub owner: &'a str,
    pub service: &'a str,
    pub rpc_info: &'a str,
    pub version: &'a str,
}

impl<'a> PortEntry<'a> {
    /// Parses a single descriptor. Returns `None` only when there is no
    /// numeric port to report.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let descriptor = Descriptor::new(raw.trim());

        let number = match descriptor.subfield(layout::NUMBER).trim().parse::<u32>() {
            Ok(number) => number,
            Err(_) => {
                log::debug!("Skipping port descriptor `{}` without a port number", raw);
                return None;
            }
        };

        Some(Self {
            number,
            state: descriptor.subfield(layout::STATE),
            protocol: descriptor.subfield(layout::PROTOCOL),
            owner: descriptor.subfield(layout::OWNER),
            service: descriptor.subfield(layout::SERVICE),
            rpc_info: descriptor.subfield(layout::RPC_INFO),
            version: descriptor.subfield(layout::VERSION),
        })
    }
}
