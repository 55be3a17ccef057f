// Listener module
// Creates the TCP listener the serve loop accepts from

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create a bound, listening `TcpListener` for the given address.
///
/// `SO_REUSEADDR` is set so a restart can bind through a socket lingering in
/// TIME_WAIT; a port with an active listener still fails with
/// `AddrInUse`, which callers treat as fatal.
pub fn create_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
