use serde::{Deserialize, Serialize};

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Ordered risk bands over the clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Bajo,
    #[serde(rename = "Moderado-Bajo")]
    ModeradoBajo,
    Moderado,
    Alto,
    #[serde(rename = "Muy Alto")]
    MuyAlto,
}

impl RiskTier {
    pub const ALL: [RiskTier; 5] = [
        RiskTier::Bajo,
        RiskTier::ModeradoBajo,
        RiskTier::Moderado,
        RiskTier::Alto,
        RiskTier::MuyAlto,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Bajo => "Bajo",
            RiskTier::ModeradoBajo => "Moderado-Bajo",
            RiskTier::Moderado => "Moderado",
            RiskTier::Alto => "Alto",
            RiskTier::MuyAlto => "Muy Alto",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            RiskTier::Bajo => "green",
            RiskTier::ModeradoBajo => "lightgreen",
            RiskTier::Moderado => "orange",
            RiskTier::Alto => "orangered",
            RiskTier::MuyAlto => "red",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            RiskTier::Bajo => "Tienes un nivel bajo de procrastinacion. Mantienes un buen equilibrio con el uso del celular.",
            RiskTier::ModeradoBajo => "Tu nivel de procrastinacion es moderado-bajo. Estas en el camino correcto, pero puedes mejorar.",
            RiskTier::Moderado => "Tienes un nivel moderado de procrastinacion. Es momento de implementar cambios en tus habitos.",
            RiskTier::Alto => "Tu nivel de procrastinacion es alto. El uso del celular esta afectando tu productividad significativamente.",
            RiskTier::MuyAlto => "Nivel de procrastinacion muy alto. Es urgente tomar medidas para reducir el tiempo en el celular.",
        }
    }
}

/// Brings a raw model output into [1, 10]. Non-finite output counts as the maximum.
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(MIN_SCORE, MAX_SCORE)
    } else {
        MAX_SCORE
    }
}

/// Tier for a score; bands are half-open, `[9, 10]` closes the top.
pub fn classify(score: f64) -> RiskTier {
    let score = clamp_score(score);
    if score < 3.0 {
        RiskTier::Bajo
    } else if score < 5.0 {
        RiskTier::ModeradoBajo
    } else if score < 7.0 {
        RiskTier::Moderado
    } else if score < 9.0 {
        RiskTier::Alto
    } else {
        RiskTier::MuyAlto
    }
}
