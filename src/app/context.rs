//! The application context: every collaborator the control loop talks to,
//! owned in one place and handed to [`AppService`](super::service::AppService)
//! on each call.

use super::ports::{ActuatorPort, ClockPort, DisplayPort, SensorPort};

pub struct Peripherals<S, C, D, A>
where
    S: SensorPort,
    C: ClockPort,
    D: DisplayPort,
    A: ActuatorPort,
{
    pub sensor: S,
    pub clock: C,
    pub display: D,
    pub relay: A,
}

impl<S, C, D, A> Peripherals<S, C, D, A>
where
    S: SensorPort,
    C: ClockPort,
    D: DisplayPort,
    A: ActuatorPort,
{
    pub fn new(sensor: S, clock: C, display: D, relay: A) -> Self {
        Self {
            sensor,
            clock,
            display,
            relay,
        }
    }
}
