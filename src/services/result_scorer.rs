use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Perfect,
    Excellent,
    VeryGood,
    Encouraging,
}

impl ScoreBand {
    /// Bands are checked top-down; lower bounds are inclusive. Only an exact
    /// 100% is perfect, so a score above the total falls to excellent.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage == 100.0 {
            ScoreBand::Perfect
        } else if percentage >= 80.0 {
            ScoreBand::Excellent
        } else if percentage >= 60.0 {
            ScoreBand::VeryGood
        } else {
            ScoreBand::Encouraging
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Perfect => "مثالي! أنتِ رائعة! ♥️ أنا أحبك كثيراً!",
            ScoreBand::Excellent => "ممتاز! أنتِ ذكية جداً! ♥️ أحبك!",
            ScoreBand::VeryGood => "جيد جداً! أنتِ رائعة! ♥️",
            ScoreBand::Encouraging => "محاولة جيدة يا عزيزتي! ♥️ نحن معاً أقوى!",
        }
    }

    pub fn message_en(&self) -> &'static str {
        match self {
            ScoreBand::Perfect => "Perfect! You're amazing! ♥️ I love you so much!",
            ScoreBand::Excellent => "Excellent! You're so smart! ♥️ I love you!",
            ScoreBand::VeryGood => "Very Good! You're wonderful! ♥️",
            ScoreBand::Encouraging => "Good try, my dear! ♥️ We're stronger together!",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u64,
    pub percentage: f64,
    pub band: ScoreBand,
    pub message: &'static str,
    pub message_en: &'static str,
}

pub struct ResultScorer;

impl ResultScorer {
    /// Pure function of `(score, total)`. A zero total yields 0% in the
    /// encouraging band; callers are expected to have caught that case.
    pub fn score(score: u32, total: u64) -> QuizResult {
        let percentage = if total > 0 {
            100.0 * f64::from(score) / total as f64
        } else {
            0.0
        };
        let band = ScoreBand::for_percentage(percentage);

        QuizResult {
            score,
            total,
            percentage,
            band,
            message: band.message(),
            message_en: band.message_en(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_for_ten_questions() {
        assert_eq!(ResultScorer::score(10, 10).band, ScoreBand::Perfect);
        assert_eq!(ResultScorer::score(9, 10).band, ScoreBand::Excellent);
        assert_eq!(ResultScorer::score(8, 10).band, ScoreBand::Excellent);
        assert_eq!(ResultScorer::score(7, 10).band, ScoreBand::VeryGood);
        assert_eq!(ResultScorer::score(6, 10).band, ScoreBand::VeryGood);
        assert_eq!(ResultScorer::score(5, 10).band, ScoreBand::Encouraging);
        assert_eq!(ResultScorer::score(0, 10).band, ScoreBand::Encouraging);
    }

    #[test]
    fn percentage_is_not_truncated() {
        let result = ResultScorer::score(2, 3);
        assert!((result.percentage - 66.666).abs() < 0.01);
        assert_eq!(result.band, ScoreBand::VeryGood);

        // 79.99% must stay below the excellent band
        let result = ResultScorer::score(7999, 10000);
        assert_eq!(result.band, ScoreBand::VeryGood);
    }

    #[test]
    fn score_above_total_is_excellent_not_perfect() {
        // questions deleted mid-quiz leave the session score above the count
        let result = ResultScorer::score(3, 2);
        assert_eq!(result.percentage, 150.0);
        assert_eq!(result.band, ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_percentage(100.5), ScoreBand::Excellent);
    }

    #[test]
    fn zero_total_is_encouraging() {
        let result = ResultScorer::score(0, 0);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.band, ScoreBand::Encouraging);
    }

    #[test]
    fn result_carries_both_messages() {
        let result = ResultScorer::score(1, 2);
        assert_eq!(result.percentage, 50.0);
        assert_eq!(result.message, ScoreBand::Encouraging.message());
        assert!(result.message_en.starts_with("Good try"));
    }
}
