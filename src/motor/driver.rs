/// Motor driver collaborator consumed by the brake loop. All operations are
/// infallible from the loop's perspective; a failing driver is the driver's
/// concern, not the control loop's.
///
/// Methods take `&self` so one driver handle can be shared between the control
/// thread and the terminal interface; implementations use interior mutability.
pub trait MotorDriver: Send + Sync {
    /// Signed rotor speed in rpm; the sign encodes direction of rotation.
    fn read_rpm(&self) -> f32;

    /// Command a duty cycle directly. The loop only ever uses `set_duty(0.0)`
    /// to coast below the speed threshold.
    fn set_duty(&self, duty: f32);

    /// Command a signed current set-point.
    fn set_current(&self, current: f32);

    /// Command a braking current by magnitude.
    fn set_brake_current(&self, current: f32);

    /// Pass-through current limit, exposed to the terminal interface.
    fn set_current_limit(&self, limit: f32);
}

/// Liveness watchdog collaborator, fed once per loop iteration. Its timeout
/// policy lives outside this crate.
pub trait Watchdog: Send + Sync {
    fn reset(&self);
}
