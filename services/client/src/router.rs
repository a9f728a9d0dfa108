//! services/client/src/router.rs
//!
//! The static route tree and a history-backed `Navigator`. Paths resolve to a
//! chain of `View`s (outermost first); relative redirects are resolved
//! against the parent route's path and unknown paths fall back to `/`.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use dnada_core::ports::{Navigator, PortError, PortResult};
use tracing::{debug, info};

/// Upper bound on redirect hops before a path is considered a loop.
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Start,
    Login,
    RecoverPassword,
    ResetPassword,
    Main,
    Dashboard,
    Tutorial,
    /// A pass-through container that only renders its child.
    Outlet,
    UserProfile,
    UserProfileEdit,
    UserProfileEditPassword,
    Experiment,
    CreateExperiment,
    Admin,
    ManageBanner,
    AdminUsers,
    EditUser,
    CreateUser,
}

/// One node of the route tree. Child paths are relative to their parent.
#[derive(Debug, Clone)]
pub struct RouteNode {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub view: Option<View>,
    pub redirect: Option<&'static str>,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(path: &'static str, view: View) -> Self {
        Self {
            path,
            name: None,
            view: Some(view),
            redirect: None,
            children: Vec::new(),
        }
    }

    /// A node with no view of its own that only forwards elsewhere.
    pub fn redirect_only(path: &'static str, target: &'static str) -> Self {
        Self {
            path,
            name: None,
            view: None,
            redirect: Some(target),
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn redirect(mut self, target: &'static str) -> Self {
        self.redirect = Some(target);
        self
    }

    pub fn children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }
}

/// The outcome of resolving a path, after redirects.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub path: String,
    pub name: Option<&'static str>,
    /// Matched views from the root down to the leaf.
    pub views: Vec<View>,
    pub params: HashMap<String, String>,
}

impl ResolvedRoute {
    /// The innermost view, the one the page is about.
    pub fn leaf(&self) -> Option<View> {
        self.views.last().copied()
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Param(String),
    CatchAll,
}

/// A flattened route with its absolute pattern.
#[derive(Debug, Clone)]
struct Record {
    pattern: Vec<Segment>,
    parent_path: String,
    name: Option<&'static str>,
    views: Vec<View>,
    redirect: Option<&'static str>,
}

impl Record {
    fn matches(&self, segments: &[&str]) -> Option<HashMap<String, String>> {
        let mut params = HashMap::new();
        for (i, part) in self.pattern.iter().enumerate() {
            match part {
                Segment::CatchAll => return Some(params),
                Segment::Literal(lit) => {
                    if segments.get(i) != Some(&lit.as_str()) {
                        return None;
                    }
                }
                Segment::Param(key) => {
                    let value = segments.get(i)?;
                    params.insert(key.clone(), (*value).to_string());
                }
            }
        }
        (segments.len() == self.pattern.len()).then_some(params)
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    records: Vec<Record>,
}

impl Router {
    pub fn new(routes: Vec<RouteNode>) -> Self {
        let mut records = Vec::new();
        for route in &routes {
            flatten(route, "", &[], &mut records);
        }
        // Catch-all patterns only apply once nothing else matched.
        records.sort_by_key(|r| r.pattern.contains(&Segment::CatchAll));
        Self { records }
    }

    /// The application's route table.
    pub fn default_routes() -> Self {
        Self::new(vec![
            RouteNode::new("/", View::Start).children(vec![
                RouteNode::new("login", View::Login),
                RouteNode::new("recover-password", View::RecoverPassword),
                RouteNode::new("reset-password", View::ResetPassword),
                RouteNode::new("main", View::Main).named("main").children(vec![
                    RouteNode::new("dashboard", View::Dashboard).named("main-dashboard"),
                    RouteNode::new("tutorial", View::Tutorial).named("main-tutorial"),
                    RouteNode::new("profile", View::Outlet)
                        .redirect("profile/view")
                        .children(vec![
                            RouteNode::new("view", View::UserProfile),
                            RouteNode::new("edit", View::UserProfileEdit),
                            RouteNode::new("password", View::UserProfileEditPassword),
                        ]),
                    RouteNode::new("experiments", View::Outlet)
                        .redirect("experiments/view")
                        .children(vec![
                            RouteNode::new("view/:id", View::Experiment).named("main-experiment"),
                            RouteNode::new("create", View::CreateExperiment)
                                .named("main-experiment-create"),
                        ]),
                    RouteNode::new("admin", View::Admin)
                        .redirect("admin/users/all")
                        .children(vec![
                            RouteNode::new("banner", View::ManageBanner),
                            RouteNode::redirect_only("users", "users/all"),
                            RouteNode::new("users/all", View::AdminUsers),
                            RouteNode::new("users/edit/:id", View::EditUser)
                                .named("main-admin-users-edit"),
                            RouteNode::new("users/create", View::CreateUser)
                                .named("main-admin-users-create"),
                        ]),
                ]),
            ]),
            RouteNode::redirect_only("/*", "/"),
        ])
    }

    /// Resolves `path`, following redirects.
    pub fn resolve(&self, path: &str) -> PortResult<ResolvedRoute> {
        let mut current = normalize(path);
        for _ in 0..=MAX_REDIRECTS {
            let segments = split(&current);
            let Some((record, params)) = self
                .records
                .iter()
                .find_map(|r| r.matches(&segments).map(|p| (r, p)))
            else {
                return Err(PortError::Navigation(format!("no route matches '{current}'")));
            };

            match record.redirect {
                Some(target) => {
                    let next = if target.starts_with('/') {
                        normalize(target)
                    } else {
                        normalize(&join(&record.parent_path, target))
                    };
                    debug!(from = %current, to = %next, "Following route redirect");
                    current = next;
                }
                None => {
                    return Ok(ResolvedRoute {
                        path: current,
                        name: record.name,
                        views: record.views.clone(),
                        params,
                    })
                }
            }
        }
        Err(PortError::Navigation(format!(
            "too many redirects resolving '{path}'"
        )))
    }

    /// Builds the path of a named route, filling `:param` segments.
    pub fn path_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        let record = self.records.iter().find(|r| r.name == Some(name))?;
        let mut parts = Vec::with_capacity(record.pattern.len());
        for segment in &record.pattern {
            match segment {
                Segment::Literal(lit) => parts.push(lit.clone()),
                Segment::Param(key) => {
                    let (_, value) = params.iter().find(|(k, _)| *k == key.as_str())?;
                    parts.push((*value).to_string());
                }
                Segment::CatchAll => return None,
            }
        }
        Some(format!("/{}", parts.join("/")))
    }
}

fn flatten(node: &RouteNode, parent_path: &str, parent_views: &[View], out: &mut Vec<Record>) {
    let full_path = normalize(&join(parent_path, node.path));
    let mut views = parent_views.to_vec();
    views.extend(node.view);

    // Children go first so that a parent never shadows a more specific child.
    for child in &node.children {
        flatten(child, &full_path, &views, out);
    }

    let pattern = split(&full_path)
        .into_iter()
        .map(|s| match s {
            "*" => Segment::CatchAll,
            s if s.starts_with(':') => Segment::Param(s[1..].to_string()),
            s => Segment::Literal(s.to_string()),
        })
        .collect();

    out.push(Record {
        pattern,
        parent_path: normalize(parent_path),
        name: node.name,
        views,
        redirect: node.redirect,
    });
}

fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), path)
    }
}

/// Drops query, fragment and duplicate or trailing slashes.
fn normalize(path: &str) -> String {
    let path = path.split(|c| c == '?' || c == '#').next().unwrap_or_default();
    format!("/{}", split(path).join("/"))
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

//=========================================================================================
// History Navigator
//=========================================================================================

/// An in-process navigation history implementing the `Navigator` port.
#[derive(Debug)]
pub struct HistoryNavigator {
    router: Router,
    history: Mutex<Vec<ResolvedRoute>>,
}

impl HistoryNavigator {
    pub fn new(router: Router, start: &str) -> PortResult<Self> {
        let first = router.resolve(start)?;
        Ok(Self {
            router,
            history: Mutex::new(vec![first]),
        })
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn current_route(&self) -> Option<ResolvedRoute> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Every resolved path visited, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|r| r.path.clone())
            .collect()
    }
}

impl Navigator for HistoryNavigator {
    fn current_path(&self) -> String {
        self.current_route()
            .map(|r| r.path)
            .unwrap_or_else(|| "/".to_string())
    }

    fn push(&self, path: &str) -> PortResult<()> {
        let route = self.router.resolve(path)?;
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if history.last().map(|r| r.path.as_str()) == Some(route.path.as_str()) {
            debug!(path = %route.path, "Already at destination; navigation skipped");
            return Ok(());
        }
        info!(requested = %path, resolved = %route.path, "Navigating");
        history.push(route);
        Ok(())
    }
}
