use crate::types::{GemClass, SocketColor};

/// Whether a gem of this class may go into a socket of this colour.
///
/// With `match_bonus` set, coloured gems are kept to sockets that keep the
/// socket bonus; otherwise any cut gem goes into any non-meta socket.
pub fn gem_fits_in(gem: GemClass, socket: SocketColor, match_bonus: bool) -> bool {
    match gem {
        GemClass::None | GemClass::Simple => false,
        GemClass::Meta => socket == SocketColor::Meta,
        _ if socket == SocketColor::Meta => false,
        GemClass::Prismatic => true,
        _ if !match_bonus => true,
        GemClass::Orange => matches!(socket, SocketColor::Red | SocketColor::Yellow),
        GemClass::Green => matches!(socket, SocketColor::Yellow | SocketColor::Blue),
        GemClass::Purple => matches!(socket, SocketColor::Blue | SocketColor::Red),
        other => other.name().eq_ignore_ascii_case(socket.name()),
    }
}
