//! Login, logout, session restore, profile and admin user actions.

use dnada_core::domain::{AccessToken, BannerUpdate, UserProfile, UserProfileCreate, UserProfileUpdate};
use dnada_core::ports::{BannerApi, SessionApi};
use dnada_core::{Banner, LoginStatus, Msg, Mutation, Notification};
use tracing::{debug, info, warn};

use super::{Actions, Feedback, Pacing, UpdateUser};

const LOGIN_PATH: &str = "/login";
const MAIN_PATH: &str = "/main";

const UPDATE_PROFILE: Feedback = Feedback::new(
    "update_user_profile",
    "Saving",
    "Profile successfully updated",
    "Error Updating Profile",
);
const PASSWORD_RECOVERY: Feedback = Feedback::new(
    "password_recovery",
    "Sending password recovery email",
    "Password recovery email sent",
    "Incorrect username",
);
const RESET_PASSWORD: Feedback = Feedback::new(
    "reset_password",
    "Resetting password",
    "Password successfully reset",
    "Error resetting password",
);
const UPDATE_BANNER: Feedback = Feedback::new(
    "update_banner",
    "Updating Banner",
    "Banner successfully updated",
    "Error Updating Banner",
);
const CREATE_USER: Feedback = Feedback::new(
    "create_user",
    "Saving",
    "User successfully created",
    "Error Creating User",
);
const UPDATE_USER: Feedback = Feedback::new(
    "update_user",
    "Saving",
    "User successfully updated",
    "Error Updating User",
);

impl Actions {
    //=====================================================================================
    // Session
    //=====================================================================================

    /// Exchanges credentials for a token and opens the session.
    ///
    /// Returns whether the login succeeded. Any failure, an empty token
    /// included, raises the login error flag and logs out fully.
    pub async fn log_in(&self, username: &str, password: &str) -> bool {
        let token = match self.api.log_in_get_token(username, password).await {
            Ok(AccessToken { access_token, .. }) if !access_token.is_empty() => access_token,
            Ok(_) => {
                warn!(username, "Login returned an empty token");
                self.store.commit(Mutation::SetLogInError(true));
                self.log_out().await;
                return false;
            }
            Err(err) => {
                warn!(username, error = %err, "Login failed");
                self.store.commit(Mutation::SetLogInError(true));
                self.log_out().await;
                return false;
            }
        };

        if let Err(err) = self.tokens.save(&token) {
            warn!(error = %err, "Could not persist the bearer token");
        }
        self.store.commit(Mutation::SetToken(token));
        self.store.commit(Mutation::SetLoggedIn(true));
        self.store.commit(Mutation::SetLogInError(false));
        self.get_user_profile().await;
        // An interceptor may have ended the session while fetching the profile.
        if self.store.read(|s| s.login_status()) != LoginStatus::LoggedIn {
            warn!(username, "Session ended before login completed");
            return false;
        }
        self.route_logged_in();
        self.notify(Notification::success("Logged in"));
        info!(username, "Logged in");
        true
    }

    /// Restores or confirms the session. A no-op while already logged in.
    pub async fn check_logged_in(&self) {
        if self.store.read(|s| s.login_status()) == LoginStatus::LoggedIn {
            return;
        }

        let mut token = self.token();
        if token.is_empty() {
            match self.tokens.load() {
                Ok(Some(stored)) => {
                    debug!("Recovered bearer token from storage");
                    self.store.commit(Mutation::SetToken(stored.clone()));
                    token = stored;
                }
                Ok(None) => {}
                Err(err) => warn!(error = %err, "Could not read the stored bearer token"),
            }
        }

        if token.is_empty() {
            self.remove_log_in();
            return;
        }

        match self.api.get_me(&token).await {
            Ok(profile) => {
                self.store.commit(Mutation::SetLoggedIn(true));
                self.store.commit(Mutation::SetUserProfile(profile));
                info!("Session restored");
            }
            Err(err) => {
                info!(error = %err, "Stored session is no longer valid");
                self.remove_log_in();
            }
        }
    }

    /// Forgets the token everywhere and marks the session logged out.
    pub fn remove_log_in(&self) {
        if let Err(err) = self.tokens.remove() {
            warn!(error = %err, "Could not remove the stored bearer token");
        }
        self.store.commit(Mutation::SetToken(String::new()));
        self.store.commit(Mutation::SetLoggedIn(false));
    }

    pub async fn log_out(&self) {
        self.remove_log_in();
        self.route_log_out();
    }

    /// A logout the user asked for, confirmed with a notification.
    pub async fn user_log_out(&self) {
        self.log_out().await;
        self.notify(Notification::success("Logged out"));
    }

    fn route_logged_in(&self) {
        let current = self.navigator.current_path();
        if current == LOGIN_PATH || current == "/" {
            if let Err(err) = self.navigator.push(MAIN_PATH) {
                warn!(error = %err, "Could not route to the main page");
            }
        }
    }

    fn route_log_out(&self) {
        if self.navigator.current_path() != LOGIN_PATH {
            if let Err(err) = self.navigator.push(LOGIN_PATH) {
                warn!(error = %err, "Could not route to the login page");
            }
        }
    }

    //=====================================================================================
    // Profile & Password
    //=====================================================================================

    pub async fn get_user_profile(&self) -> Option<UserProfile> {
        let token = self.token();
        let profile = self
            .fetched("get_user_profile", self.api.get_me(&token).await)
            .await?;
        self.store.commit(Mutation::SetUserProfile(profile.clone()));
        Some(profile)
    }

    pub async fn update_user_profile(&self, changes: UserProfileUpdate) -> Option<UserProfile> {
        let token = self.token();
        self.tracked(
            UPDATE_PROFILE,
            Pacing::Padded,
            self.api.update_me(&token, &changes),
            |profile: &UserProfile| vec![Mutation::SetUserProfile(profile.clone())],
        )
        .await
    }

    /// Requests a recovery email for `email`, then logs out.
    pub async fn password_recovery(&self, email: &str) -> Option<Msg> {
        let msg = self
            .tracked(
                PASSWORD_RECOVERY,
                Pacing::Padded,
                self.api.password_recovery(email),
                |_| Vec::new(),
            )
            .await?;
        self.log_out().await;
        Some(msg)
    }

    /// Sets a new password with the one-time `reset_token`, then logs out.
    pub async fn reset_password(&self, new_password: &str, reset_token: &str) -> Option<Msg> {
        let msg = self
            .tracked(
                RESET_PASSWORD,
                Pacing::Padded,
                self.api.reset_password(new_password, reset_token),
                |_| Vec::new(),
            )
            .await?;
        self.log_out().await;
        Some(msg)
    }

    //=====================================================================================
    // Banner
    //=====================================================================================

    pub async fn get_banner(&self) -> Option<Banner> {
        let token = self.token();
        let banner = self
            .fetched("get_banner", self.api.get_banner(&token).await)
            .await?;
        self.store.commit(Mutation::SetBanner(banner.clone()));
        Some(banner)
    }

    pub async fn update_banner(&self, update: BannerUpdate) -> Option<Banner> {
        let token = self.token();
        self.tracked(
            UPDATE_BANNER,
            Pacing::Padded,
            self.api.update_banner(&token, &update),
            |banner: &Banner| vec![Mutation::SetBanner(banner.clone())],
        )
        .await
    }

    //=====================================================================================
    // User Administration
    //=====================================================================================

    pub async fn get_users(&self) -> Option<Vec<UserProfile>> {
        let token = self.token();
        let users = self
            .fetched("get_users", self.api.get_users(&token).await)
            .await?;
        self.store.commit(Mutation::SetUsers(users.clone()));
        Some(users)
    }

    pub async fn create_user(&self, user: UserProfileCreate) -> Option<UserProfile> {
        let token = self.token();
        self.tracked(
            CREATE_USER,
            Pacing::Padded,
            self.api.create_user(&token, &user),
            |created: &UserProfile| vec![Mutation::SetUser(created.clone())],
        )
        .await
    }

    pub async fn update_user(&self, payload: UpdateUser) -> Option<UserProfile> {
        let token = self.token();
        self.tracked(
            UPDATE_USER,
            Pacing::Padded,
            self.api.update_user(&token, payload.user_id, &payload.changes),
            |updated: &UserProfile| vec![Mutation::SetUser(updated.clone())],
        )
        .await
    }
}
