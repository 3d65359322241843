//! Fixed copy shown by the assistant: page header, per-mode headers,
//! onboarding greetings and suggested prompts.
//!
//! Everything here is a pure lookup keyed by `(Mode, Option<SubMode>)`.

use crate::core::mode::{Mode, SubMode};

pub const PAGE_TITLE: &str = "AI-помощник для учебы";
pub const PAGE_SUBTITLE: &str = "Решай задачи, пиши конспекты и проходи тесты — всё в одном месте";

pub const COMPOSER_PLACEHOLDER: &str = "Напишите ваш вопрос...";
pub const SUB_MODE_PLACEHOLDER: &str = "Выберите режим работы";
pub const MODE_PICKER_PROMPT: &str = "Выберите, как будем работать:";

const INFORMATION_SUGGESTIONS: [&str; 4] = [
    "Найди информацию о квантовой физике",
    "Расскажи про историю Древнего Рима",
    "Объясни принципы машинного обучения",
    "Что такое фотосинтез?",
];

const TEXT_SUGGESTIONS: [&str; 4] = [
    "Помоги написать эссе по литературе",
    "Проверь мой текст на ошибки",
    "Перефразируй этот абзац",
    "Составь план для курсовой работы",
];

const TUTOR_SUGGESTIONS: [&str; 4] = [
    "Объясни решение уравнения",
    "Помоги с домашним заданием по химии",
    "Разбери задачу по физике",
    "Подготовься к экзамену по математике",
];

const CAREER_SUGGESTIONS: [&str; 4] = [
    "Какие профессии подходят мне?",
    "Расскажи про карьеру в IT",
    "Как развиваться в маркетинге?",
    "Что изучать для работы дизайнером?",
];

/// Header line of the main area.
pub fn header_text(mode: Mode, sub_mode: Option<SubMode>) -> String {
    match (mode, sub_mode) {
        (Mode::Chat, Some(sub)) => format!("{} • {}", Mode::Chat.label(), sub.label()),
        _ => mode.label().to_string(),
    }
}

/// Description printed under the header.
pub fn header_subtitle(mode: Mode, sub_mode: Option<SubMode>) -> &'static str {
    match (mode, sub_mode) {
        (Mode::Chat, Some(SubMode::Information)) => {
            "Найдите любую информацию и получите подробные ответы"
        }
        (Mode::Chat, Some(SubMode::Text)) => {
            "Работайте с текстами: пишите, редактируйте, анализируйте"
        }
        (Mode::Chat, None) => "",
        (Mode::Tutor, _) => "Персональный помощник для изучения любых предметов",
        (Mode::Career, _) => "Найдите свой путь в профессиональном развитии",
        (Mode::Support, _) => "Опишите вашу проблему, и мы поможем её решить",
    }
}

/// Onboarding sentence shown as the assistant's first bubble.
/// Empty on the mode picker screen and in support mode.
pub fn greeting_text(mode: Mode, sub_mode: Option<SubMode>) -> &'static str {
    match (mode, sub_mode) {
        (Mode::Chat, Some(SubMode::Information)) => {
            "Привет! Я помогу найти и понятно объяснить любую информацию. Что тебя интересует?"
        }
        (Mode::Chat, Some(SubMode::Text)) => {
            "Привет! Я помогу написать, отредактировать или проанализировать текст. С чем будем работать?"
        }
        (Mode::Chat, None) | (Mode::Support, _) => "",
        (Mode::Tutor, _) => {
            "Привет! Я твой персональный тьютор. Какую тему или задачу разберём сегодня?"
        }
        (Mode::Career, _) => {
            "Привет! Давай вместе подумаем о твоём профессиональном будущем. С чего начнём?"
        }
    }
}

/// Suggested prompts for the current view, in display order.
pub fn suggestion_list(mode: Mode, sub_mode: Option<SubMode>) -> &'static [&'static str] {
    match (mode, sub_mode) {
        (Mode::Chat, Some(SubMode::Information)) => &INFORMATION_SUGGESTIONS,
        (Mode::Chat, Some(SubMode::Text)) => &TEXT_SUGGESTIONS,
        (Mode::Chat, None) | (Mode::Support, _) => &[],
        (Mode::Tutor, _) => &TUTOR_SUGGESTIONS,
        (Mode::Career, _) => &CAREER_SUGGESTIONS,
    }
}

/// Card description on the mode picker screen.
pub fn sub_mode_description(sub_mode: SubMode) -> &'static str {
    header_subtitle(Mode::Chat, Some(sub_mode))
}
