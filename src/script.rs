//! The scripted conversation: what each command plays back.
//!
//! Content lives in static tables and is bound to a chat per invocation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use teloxide::types::{ChatId, KeyboardButton, KeyboardMarkup};

use crate::commands::Command;
use crate::config::ScriptConfig;
use crate::playback::{MessageDescriptor, MessageKind};

#[derive(Debug, Clone, Copy)]
enum StepKind {
    Text,
    // No shipped table attaches a document yet.
    #[cfg_attr(not(test), allow(dead_code))]
    Document,
    Photo,
}

/// One row of a content table. Upload paths are relative to the assets directory.
#[derive(Debug, Clone, Copy)]
struct Step {
    kind: StepKind,
    content: &'static str,
    delay_secs: u64,
    keyboard: bool,
}

const fn text(content: &'static str, delay_secs: u64) -> Step {
    Step {
        kind: StepKind::Text,
        content,
        delay_secs,
        keyboard: false,
    }
}

const fn text_with_keyboard(content: &'static str, delay_secs: u64) -> Step {
    Step {
        kind: StepKind::Text,
        content,
        delay_secs,
        keyboard: true,
    }
}

const fn photo(file: &'static str, delay_secs: u64) -> Step {
    Step {
        kind: StepKind::Photo,
        content: file,
        delay_secs,
        keyboard: false,
    }
}

const START: &[Step] = &[
    text("Hi 🙂!", 1),
    text("My name is Luc", 2),
    text("... or rather his small digital copy!", 2),
    text_with_keyboard("How can I help you?", 1),
];

const BACK: &[Step] = &[text_with_keyboard("What are you interested in?", 2)];

const STORY: &[Step] = &[
    text("Ok!", 1),
    text("This is me:", 1),
    photo("luc.jpg", 2),
    text("As I said my name is * Luc Michalski *, I am * 40 years old * and I live in Lyon (France).", 1),
    text("I love the skydiving, savate (french boxe) but above all * my job *!", 2),
    text("I currently work at Eedama where I hold the role * Senior Backend Developer * and I work daily with these technologies:", 2),
    text("In the current workplace I find myself working daily with the following technologies:", 2),
    text("-Go \n- PHP\n- MySQL\n- Docker\n- Docker-Compose\n- Github\n", 2),
    text("I started my career at Evolutive Business Group in France where I specialized in e-commerce...", 2),
    text("Then, I moved to UK, where I had the tremedous luck to work for We Are Social, as senior social media technologist, specialized in social networks (Facebook, Twitter, Instagram)...", 2),
    text("My second work experience in UK was Blippar, company that allowed my to get a visa L1-A to New York, where I operated as the Global Head of Server", 2),
    text("This is only a part of my knowledge, for the list and a complete detail you can use the button * Technologies and Projects * in the menu below.", 2),
    text("In the * Contact * section I leave you the link to my * GitHub * where you can check the quality of my code, such as this Bot, without wasting time doing those boring and useless tests. NoTest * #! *", 2),
    text("If you think my figure can be useful for your project and if you have an interesting proposal, feel free to contact me!", 2),
];

const JOBS: &[Step] = &[
    text("*Senior PHP Backend & Rest API Developer*\nGiugno 2018 - OGGI\n*Facile.it S.p.A*\n\nAgency; Sviluppo e mantenimento Web Application e servizi Rest API \n\nTecnologie usate/apprese: PHP - MySQL - Symfony - Docker - k8s - GitLab - Redis - Kibana - RabbitMQ", 1),
    text("*Senior PHP Backend & Rest API Developer*\nAprile 2015 - Giugno 2018\n*S2K Agency*\n\nAgency; Sviluppo e mantenimento Web Application e servizi Rest API \n\nTecnologie usate/apprese: PHP - MySQL - Laravel - Docker - Git - Redis - Deployer", 1),
    text("*Junior PHP Web Developer*\nMaggio 2014 - Marzo 2015\n*Pro Web Consulting*\n\nAgency; Sviluppo e mantenimento Web Application.\n\nTecnologie usate/apprese: PHP - MySQL - Laravel - Homestead - Git", 1),
    text("*Junior PHP Web Developer*\nFebbraio 2012 - Aprile 2014\n*Touring Club Italiano*\n\nSviluppo e mantenimento dei canali pubblici principali di Touring Club Italiano e Bandiere Arancioni.\n\nTecnologie usate/apprese: PHP - MySQL - CodeIgniter - Drupal", 1),
    text("*Tester Funzionale, PMO*\nOttobre 2011 - Febbraio 2012\n*NTT DATA Italia*\n\nMi occupavo principalmente di eseguire dei test funzionali su applicativi riguardanti la pubblicazione e gestione pubblicità a livello web, stampa e radio per il *GRUPPO SOLE 24 ORE*.", 1),
];

const TECHNOLOGIES: &[Step] = &[text(
    "*Languages*: \n -*PHP* ⭐️⭐️⭐️⭐️⭐️  \n -*Go* ⭐️⭐️⭐️⭐️ \n -*Python* ⭐️⭐️⭐️\n -*C#* ⭐️⭐️\n -*Rust* ⭐️⭐️ \n\n\
*Database*: \n -*MySQL* ⭐️⭐️⭐️⭐️⭐️  \n -*MongoDB* ⭐️⭐️⭐️ \n\n\
*Framework*: \n -*Symfony* ⭐️⭐️⭐️⭐️⭐️  \n -*Laravel* ⭐️⭐️⭐️⭐️⭐️  \n -*Codeigniter* ⭐️⭐️⭐️ \n -*Rocket* ⭐️⭐️\n\n\
*Cache*: \n -*Redis* ⭐️⭐️⭐️⭐️ \n\n\
*Altro*: \n -*Docker* ⭐️⭐️⭐️⭐️ \n -*RabbitMQ* ⭐️⭐️⭐️ \n -*k8s* ⭐️",
    1,
)];

const CONTACTS: &[Step] = &[text(
    "*Email*: michalski.luc@gmail.com \n*Linkedin*: https://www.linkedin.com/in/luc-m-2751909/ \n*Github*: https://github.com/lucmichalski",
    1,
)];

/// The home reply keyboard. Button labels come back as plain text when pressed.
pub fn home_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new("Tell me who you are")],
        vec![
            KeyboardButton::new("Working career"),
            KeyboardButton::new("Technologies and Projects"),
        ],
        vec![KeyboardButton::new("Contacts")],
    ])
}

/// Immutable, process-wide script state: content tables plus the shared keyboard.
#[derive(Debug, Clone)]
pub struct Script {
    keyboard: Arc<KeyboardMarkup>,
    assets_dir: PathBuf,
}

impl Script {
    pub fn new(config: &ScriptConfig) -> Self {
        Self {
            keyboard: Arc::new(home_keyboard()),
            assets_dir: config.assets_dir.clone(),
        }
    }

    /// Build the playback sequence of `command` for one chat.
    pub fn sequence(&self, command: Command, chat_id: ChatId) -> Vec<MessageDescriptor> {
        let steps = match command {
            Command::Start => START,
            Command::Back => BACK,
            Command::Story => STORY,
            Command::Jobs => JOBS,
            Command::Technologies => TECHNOLOGIES,
            Command::Contacts => CONTACTS,
        };

        steps.iter().map(|step| self.bind(step, chat_id)).collect()
    }

    fn bind(&self, step: &Step, chat_id: ChatId) -> MessageDescriptor {
        let kind = match step.kind {
            StepKind::Text => MessageKind::PlainText(step.content.to_string()),
            StepKind::Document => MessageKind::DocumentUpload(self.assets_dir.join(step.content)),
            StepKind::Photo => MessageKind::PhotoUpload(self.assets_dir.join(step.content)),
        };

        MessageDescriptor {
            chat_id,
            kind,
            delay: Duration::from_secs(step.delay_secs),
            keyboard: step.keyboard.then(|| Arc::clone(&self.keyboard)),
        }
    }
}
