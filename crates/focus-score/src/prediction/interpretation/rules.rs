use super::{Recommendation, Severity, Signals};

pub const MAX_RECOMMENDATIONS: usize = 5;

/// Score at which the professional-support recommendation is added.
pub const PROFESSIONAL_SUPPORT_SCORE: f64 = 8.0;

pub(crate) fn recommend(signals: &Signals, score: f64) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(hours) = signals.daily_usage_hours {
        if hours > 6.0 {
            recommendations.push(Recommendation::new(
                Severity::Critico,
                "Reduce el tiempo de uso del celular",
                format!(
                    "Usas {hours:?} horas diarias. Intenta reducir a 4-5 horas estableciendo limites en las apps."
                ),
            ));
        } else if hours > 4.0 {
            recommendations.push(Recommendation::new(
                Severity::Advertencia,
                "Controla tu tiempo en el celular",
                format!(
                    "Usas {hours:?} horas diarias. Considera establecer tiempos especificos para usar el celular."
                ),
            ));
        }
    }

    if let Some(hours) = signals.social_media_hours {
        if hours > 3.0 {
            recommendations.push(Recommendation::new(
                Severity::Critico,
                "Limita el tiempo en redes sociales",
                format!(
                    "Pasas {hours:.1} horas en redes sociales. Usa temporizadores de apps para limitarlo a 1-1.5 horas."
                ),
            ));
        } else if hours > 2.0 {
            recommendations.push(Recommendation::new(
                Severity::Advertencia,
                "Reduce tiempo en redes sociales",
                format!(
                    "Pasas {hours:.1} horas en redes sociales. Considera reducirlo gradualmente."
                ),
            ));
        }
    }

    if let Some(hours) = signals.sleep_hours.filter(|hours| *hours < 7.0) {
        recommendations.push(Recommendation::new(
            Severity::Advertencia,
            "Mejora tus habitos de sueno",
            format!(
                "Duermes {hours:?} horas. Intenta dormir 7-9 horas y evita el celular 1 hora antes de dormir."
            ),
        ));
    }

    if let Some(hours) = signals.screen_before_bed_hours {
        if hours > 1.0 {
            recommendations.push(Recommendation::new(
                Severity::Advertencia,
                "Evita pantallas antes de dormir",
                format!(
                    "Usas el celular {hours:.1} horas antes de dormir. Intenta reducirlo a menos de 0.5 horas (30 minutos)."
                ),
            ));
        } else if hours > 0.5 {
            recommendations.push(Recommendation::new(
                Severity::Consejo,
                "Reduce pantallas antes de dormir",
                "Intenta usar el celular menos de 30 minutos antes de acostarte para mejorar la calidad del sueno.",
            ));
        }
    }

    if signals.exercise_hours.is_some_and(|hours| hours < 2.0) {
        recommendations.push(Recommendation::new(
            Severity::Consejo,
            "Aumenta la actividad fisica",
            "Haz al menos 3-4 horas de ejercicio a la semana para reducir el estres y mejorar el enfoque.",
        ));
    }

    if score >= PROFESSIONAL_SUPPORT_SCORE {
        recommendations.push(Recommendation::new(
            Severity::Critico,
            "Busca apoyo profesional",
            "Considera hablar con un orientador o psicologo sobre tus habitos digitales.",
        ));
    }

    recommendations.push(Recommendation::new(
        Severity::Consejo,
        "Implementa la tecnica Pomodoro",
        "Estudia 25 minutos sin distracciones, descansa 5 minutos. Repite 4 veces y toma un descanso largo.",
    ));

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
