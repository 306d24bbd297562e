/// Fixed-period PID filter with output limiting and integral anti-windup.
///
/// One instance is owned by the brake loop and rebuilt from the live tuning
/// parameters whenever active braking (re-)begins, so no integral history
/// survives a pass through the low-speed regime.
pub struct Pid {
    period: f32,
    out_max: f32,
    out_min: f32,
    kp: f32,
    ki: f32,
    kd: f32,
    integral: f32,
    prev_error: f32,
}

impl Pid {
    pub fn new(period: f32, out_max: f32, out_min: f32, kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            period,
            out_max,
            out_min,
            kp,
            ki,
            kd,
            integral: 0.0,
            prev_error: 0.0,
        }
    }

    /// Consume one error sample and produce a control output bounded to
    /// `[out_min, out_max]`.
    pub fn update(&mut self, error: f32) -> f32 {
        self.integral += error * self.period;

        // Anti-windup: bound the integral so its contribution cannot exceed
        // the output span. Symmetric so the accumulator keeps its sign, which
        // the brake loop reads as the wind-down signal.
        if self.ki != 0.0 {
            let limit = (self.out_max / self.ki).abs();
            self.integral = self.integral.clamp(-limit, limit);
        }

        let derivative = (error - self.prev_error) / self.period;
        self.prev_error = error;

        let output = self.kp * error + self.ki * self.integral + self.kd * derivative;
        output.clamp(self.out_min, self.out_max)
    }

    /// Integral accumulator; its sign distinguishes wind-down from wind-up.
    pub fn integral(&self) -> f32 {
        self.integral
    }
}
