//! Well-known identities, limits and timings.

use std::time::Duration;

use uuid::{uuid, Uuid};

/// Application name
pub const APP_NAME: &str = "Nattstad";

/// Fixed identity of the auto-replying bot account.
pub const BOT_ID: Uuid = uuid!("00000000-0000-4000-8000-0000000000b0");

/// Friend limit for standard accounts.
pub const FRIEND_LIMIT: usize = 50;

/// Friend limit for VIP accounts.
pub const FRIEND_LIMIT_VIP: usize = 100;

/// Required PIN length (digits).
pub const PIN_LENGTH: usize = 6;

/// Minimum age to register.
pub const MIN_AGE: u32 = 18;

/// Maximum accepted age at registration.
pub const MAX_AGE: u32 = 100;

/// Delay before the bot answers a message.
pub const BOT_REPLY_DELAY: Duration = Duration::from_secs(2);

/// How long after the last keystroke a typing indicator is cleared.
pub const TYPING_CLEAR_DELAY: Duration = Duration::from_secs(3);

/// Interval of the self-presence heartbeat.
pub const PRESENCE_INTERVAL: Duration = Duration::from_secs(30);

/// Canned content of a nudge message.
pub const NUDGE_CONTENT: &str = "Knuff!";

/// The heart glyph that triggers the bot's heart reply.
pub const HEART_GLYPH: &str = "❤️";

/// Default bot replies, picked uniformly at random.
pub const BOT_RESPONSES: &[&str] = &[
    "Hallå där! Staden sover, men jag är vaken. 🌙",
    "Bra val! Jag älskar att chatta mitt i natten. ✨",
    "Har du sett hur fint det lyser i Nattstad ikväll?",
    "Jag är bara en bot, men jag känner mig ganska VIP idag! 😎",
    "Skicka en bild vetja! Jag gillar att titta på konst.",
    "Knuffa mig inte för hårt, jag blir lätt yr! 😵‍💫",
    "Visste du att Stockholm är vackrast efter klockan 03:00?",
    "Jag sparar alla våra hemligheter... i mitt digitala minne. 🤖",
    "Är du också en nattuggla? 🦉",
    "Testa att skicka din plats, jag kan se vart du är! 📍",
    "Hjärtan är det finaste som finns, skicka ett! ❤️",
];

/// Bot reply when the triggering message shared a location.
pub const BOT_LOCATION_REPLY: &str =
    "Vilket coolt ställe! Jag önskar att jag kunde gå dit med dig. 🚶‍♂️💨";

/// Bot reply when the triggering message was an image.
pub const BOT_IMAGE_REPLY: &str =
    "Vilken fin bild! Den åker direkt upp på min digitala vägg. 🖼️✨";

/// Bot reply when the triggering message was exactly a heart.
pub const BOT_HEART_REPLY: &str =
    "Åh, ett hjärta! Jag känner kärleken ända in i koden! 😍❤️❤️";
