// Static game content: quiz levels, intro script and the image manifest.

use crate::screens::{ItemKey, Screen};

pub mod images {
    pub const BLUE_CRYSTAL: &str = "images/blue-crystal-icon.png";
    pub const GOLDEN_ROPE: &str = "images/golden-rope.png";
    pub const SHINY_SHIELD: &str = "images/shiny-shield.png";
    pub const CERTIFICATE: &str = "images/everlasting-cape.png";

    pub const START_BG: &str = "images/start-bg.png";
    pub const INTRO_BG: &str = "images/intro-bg.png";
    pub const SUMMARY_BG: &str = "images/summary-bg.jpg";
    pub const LEVEL1_BG: &str = "images/level1-bg.png";
    pub const LEVEL2_BG: &str = "images/level2-bg.png";
    pub const LEVEL3_BG: &str = "images/level3-bg.png";
    pub const LEVEL4_BG: &str = "images/level4-bg.png";
    pub const END_BG: &str = "images/end.png";

    pub const HEDGEHOG_HAPPY: &str = "images/hedgehog-happy.png";
    pub const HEDGEHOG_CRY: &str = "images/hedgehog-sad.png";
    pub const HEDGEHOG_WORRIED: &str = "images/hedgehog-worried.png";
    pub const HEDGEHOG_GO: &str = "images/hedgehog-go.png";
    pub const HEDGEHOG_BATTLE: &str = "images/hedgehog-battle.png";
    pub const HEDGEHOG_END: &str = "images/hedgehog-end.png";

    pub const WATER_MONSTER: &str = "images/water-monster.png";
    pub const SANDPAPER_MONSTER: &str = "images/sandpaper-monster.png";
    pub const GLITCH_MONSTER: &str = "images/glitch-monster.png";
    pub const FINAL_BOSS: &str = "images/final-boss.png";
    pub const CLOUD: &str = "images/cloud.png";

    /// Everything the preloader fetches before the start screen is shown.
    pub const MANIFEST: [&str; 23] = [
        BLUE_CRYSTAL,
        GOLDEN_ROPE,
        SHINY_SHIELD,
        CERTIFICATE,
        START_BG,
        INTRO_BG,
        SUMMARY_BG,
        LEVEL1_BG,
        LEVEL2_BG,
        LEVEL3_BG,
        LEVEL4_BG,
        END_BG,
        HEDGEHOG_HAPPY,
        HEDGEHOG_CRY,
        HEDGEHOG_WORRIED,
        HEDGEHOG_GO,
        HEDGEHOG_BATTLE,
        HEDGEHOG_END,
        WATER_MONSTER,
        SANDPAPER_MONSTER,
        GLITCH_MONSTER,
        FINAL_BOSS,
        CLOUD,
    ];
}

#[derive(Debug, Clone, Copy)]
pub struct QuizOption {
    pub label: &'static str,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct QuizLevel {
    pub id: Screen,
    pub context: &'static str,
    pub question: &'static str,
    pub options: [QuizOption; 2],
    pub reward_item: ItemKey,
    pub reward_name: &'static str,
    /// Next quiz screen, or `Summary` after the boss.
    pub next_screen: Screen,
    pub enemy_image: &'static str,
    pub background: &'static str,
}

pub const LEVELS: [QuizLevel; 4] = [
    QuizLevel {
        id: Screen::Level1,
        context: "糟糕！水分子軍團發動膨脹攻擊，布料即將失守！",
        question: "為了抵擋水分子的膨脹攻擊，該選哪種原料？",
        options: [
            QuizOption {
                label: "一般 G100 天絲",
                is_correct: false,
            },
            QuizOption {
                label: "Micro LF 天絲",
                is_correct: true,
            },
        ],
        reward_item: ItemKey::BlueCrystal,
        reward_name: "能量藍晶石 (Micro LF)",
        next_screen: Screen::Level2,
        enemy_image: images::WATER_MONSTER,
        background: images::LEVEL1_BG,
    },
    QuizLevel {
        id: Screen::Level2,
        context: "前方發現摩擦黑洞！紗線開始鬆散滑脫了！",
        question: "為了不讓紗線鬆散滑脫，該怎麼辦？",
        options: [
            QuizOption {
                label: "低撚度",
                is_correct: false,
            },
            QuizOption {
                label: "強化撚度工藝",
                is_correct: true,
            },
        ],
        reward_item: ItemKey::GoldenRope,
        reward_name: "黃金緊固繩 (強化撚度)",
        next_screen: Screen::Level3,
        enemy_image: images::SANDPAPER_MONSTER,
        background: images::LEVEL2_BG,
    },
    QuizLevel {
        id: Screen::Level3,
        context: "變形怪獸現身！布料結構正在崩壞！",
        question: "需要更強的結構支撐，該用哪種織法？",
        options: [
            QuizOption {
                label: "1/4 斜紋",
                is_correct: false,
            },
            QuizOption {
                label: "1/2 斜紋 + 增加交織點",
                is_correct: true,
            },
        ],
        reward_item: ItemKey::ShinyShield,
        reward_name: "閃耀結構盾 (交織點)",
        next_screen: Screen::Level4,
        enemy_image: images::GLITCH_MONSTER,
        background: images::LEVEL3_BG,
    },
    QuizLevel {
        id: Screen::Level4,
        context: "終極 BOSS：地獄洗衣機降臨！",
        question: "真正的強者不怕考驗，我們要進行什麼測試？",
        options: [
            QuizOption {
                label: "只看新品柔軟的樣子",
                is_correct: false,
            },
            QuizOption {
                label: "洗衣機與摩擦實測",
                is_correct: true,
            },
        ],
        reward_item: ItemKey::Certificate,
        reward_name: "永恆光輝披風 (經久耐用)",
        next_screen: Screen::Summary,
        enemy_image: images::FINAL_BOSS,
        background: images::LEVEL4_BG,
    },
];

const fn exactly_one_correct(levels: &[QuizLevel]) -> bool {
    let mut i = 0;
    while i < levels.len() {
        let options = &levels[i].options;
        let mut correct = 0;
        let mut j = 0;
        while j < options.len() {
            if options[j].is_correct {
                correct += 1;
            }
            j += 1;
        }
        if correct != 1 {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    exactly_one_correct(&LEVELS),
    "every quiz level needs exactly one correct option"
);

pub fn level_for(screen: Screen) -> Option<&'static QuizLevel> {
    screen.level_index().map(|i| &LEVELS[i])
}

#[derive(Debug, Clone, Copy)]
pub struct StoryLine {
    pub text: &'static str,
    pub speaker: &'static str,
    pub portrait: &'static str,
}

pub const STORY_SCRIPT: [StoryLine; 5] = [
    StoryLine {
        text: "糟糕！睡眠星球的防護層正在崩壞！\n邪惡的「起毛球軍團」入侵了我們的纖維世界！",
        speaker: "Cici",
        portrait: images::HEDGEHOG_WORRIED,
    },
    StoryLine {
        text: "如果不趕快阻止它們，布料就會變得粗糙刺癢，\n再也沒辦法睡個好覺了...",
        speaker: "Cici",
        portrait: images::HEDGEHOG_WORRIED,
    },
    StoryLine {
        text: "別擔心！只要啟動「天絲Plus+ 防護系統」，\n就能找回強韌光滑的纖維！",
        speaker: "Cici",
        portrait: images::HEDGEHOG_GO,
    },
    StoryLine {
        text: "我是守護者 Cici！必須前往不同世界，\n收集失落的寶物，才能修復防護罩！",
        speaker: "Cici",
        portrait: images::HEDGEHOG_GO,
    },
    StoryLine {
        text: "第一站是充滿水分子的深水區域...\n準備好了嗎？戰鬥開始！",
        speaker: "Cici",
        portrait: images::HEDGEHOG_BATTLE,
    },
];

pub fn item_icon(key: ItemKey) -> &'static str {
    match key {
        ItemKey::BlueCrystal => images::BLUE_CRYSTAL,
        ItemKey::GoldenRope => images::GOLDEN_ROPE,
        ItemKey::ShinyShield => images::SHINY_SHIELD,
        ItemKey::Certificate => images::CERTIFICATE,
    }
}
