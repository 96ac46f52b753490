use std::f32::consts::PI;

/// Easing curves; each maps linear progress in `[0, 1]` to eased progress
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Ease {
    #[default]
    Linear,
    Power2Out,
    Power2InOut,
    SineInOut,
    /// Overshoots and rings before settling on 1
    ElasticOut,
    /// Overshoots once before settling on 1
    BackOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::ElasticOut => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let period = 0.3;
                let c = 2.0 * PI / period;
                2f32.powf(-10.0 * t) * ((t - period / 4.0) * c).sin() + 1.0
            }
            Ease::BackOut => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 6] = [
        Ease::Linear,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::SineInOut,
        Ease::ElasticOut,
        Ease::BackOut,
    ];

    #[test]
    fn test_endpoints_are_fixed() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-5, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-5, "{ease:?} at 1");
        }
    }

    #[test]
    fn test_out_curves_lead_linear() {
        assert!(Ease::Power2Out.apply(0.25) > 0.25);
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_elastic_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::ElasticOut.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }
}
