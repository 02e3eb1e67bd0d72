//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                       | Connects to              |
//! |------------|----------------------------------|--------------------------|
//! | `hardware` | ProbePort, TransportPort,        | one probe, one mesh link |
//! |            | IndicatorPort                    | and one indicator        |
//! | `log_sink` | EventSink                        | `log` facade             |
//! | `sim`      | ProbePort, TransportPort         | simulated probe + gateway|
//! | `time`     | —                                | monotonic ms clock       |

pub mod hardware;
pub mod log_sink;
pub mod sim;
pub mod time;
