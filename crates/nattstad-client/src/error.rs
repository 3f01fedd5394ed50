use thiserror::Error;

/// Errors produced by the command layer.
///
/// The `Display` text is what the app shows the user, so most variants carry
/// the product's Swedish strings verbatim. The store itself never fails;
/// everything here is call-site policy.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("Felaktigt användarnamn eller lösenord")]
    BadCredentials,

    #[error("Underhållsläge: endast admins kan logga in")]
    MaintenanceMode,

    #[error("Användarnamn krävs")]
    UsernameRequired,

    #[error("Displaynamn krävs")]
    DisplayNameRequired,

    #[error("Användarnamnet är redan upptaget")]
    UsernameTaken,

    #[error("Lösenord krävs")]
    PasswordRequired,

    #[error("Lösenordet ska bestå av minst en stor bokstav och ett specialtecken")]
    WeakPassword,

    #[error("Födelsedata saknas")]
    BirthDataMissing,

    #[error("Du måste vara minst 18 år för att registrera dig.")]
    UnderAge,

    #[error("Ogiltig ålder.")]
    InvalidAge,

    #[error("6-siffrig PIN krävs")]
    PinRequired,

    #[error("PIN-koden är för enkel.")]
    SimplePin,

    #[error("Du måste acceptera villkoren")]
    TermsNotAccepted,

    #[error("Användarnamn eller PIN matchar inte.")]
    PinMismatch,

    #[error("Ingen användare är inloggad")]
    NotLoggedIn,

    #[error("Användaren hittades inte.")]
    UserNotFound,

    #[error("Vänförfrågan är redan skickad! 📨")]
    RequestAlreadySent,

    #[error("Ni är redan vänner! 🤝")]
    AlreadyFriends,

    #[error("Vän-gräns nådd! Uppgradera till VIP för upp till 100 vänner. ✨")]
    FriendLimitReached,

    #[error("VIP KRÄVS: Endast VIP-medlemmar kan skapa grupper! ✨")]
    VipRequiredForGroups,

    #[error("VIP KRÄVS: Du måste vara VIP-medlem för att byta stad! ✨")]
    VipRequiredForCityChange,

    #[error("Gruppnamn saknas!")]
    GroupNameMissing,

    #[error("Välj minst en vän!")]
    NoMembersSelected,

    #[error("Meddelandet är tomt")]
    EmptyMessage,

    #[error("Du kan inte blockera dig själv.")]
    CannotBlockSelf,

    #[error("Endast administratörer har åtkomst")]
    AdminRequired,

    #[error("Lock poisoned")]
    LockPoisoned,
}
