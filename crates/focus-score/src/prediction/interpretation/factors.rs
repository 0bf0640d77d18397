use super::{Impact, RiskFactor, Signals};

pub(crate) fn risk_factors(signals: &Signals) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if let Some(hours) = signals.daily_usage_hours.filter(|hours| *hours > 6.0) {
        factors.push(RiskFactor {
            factor: "Uso excesivo del celular".to_string(),
            value: format!("{hours:?} horas/dia"),
            impact: Impact::Alto,
        });
    }

    if let Some(hours) = signals.social_media_hours.filter(|hours| *hours > 3.0) {
        factors.push(RiskFactor {
            factor: "Tiempo elevado en redes sociales".to_string(),
            value: format!("{hours:.1} horas/dia"),
            impact: Impact::Alto,
        });
    }

    if let Some(checks) = signals.phone_checks_per_day.filter(|checks| *checks > 100) {
        factors.push(RiskFactor {
            factor: "Revisar celular frecuentemente".to_string(),
            value: format!("{checks} veces/dia"),
            impact: Impact::Medio,
        });
    }

    if let Some(hours) = signals.gaming_hours.filter(|hours| *hours > 2.0) {
        factors.push(RiskFactor {
            factor: "Tiempo en videojuegos".to_string(),
            value: format!("{hours:.1} horas/dia"),
            impact: Impact::Medio,
        });
    }

    factors
}
