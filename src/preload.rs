// Image preloader and loading screen. The game only becomes interactive once every
// image has either loaded or failed.

use std::collections::HashMap;

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::content::images::MANIFEST;
use crate::screens::AppPhase;

pub struct PreloadPlugin;

impl Plugin for PreloadPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_preload)
            .add_systems(OnEnter(AppPhase::Loading), spawn_loading_screen)
            .add_systems(
                Update,
                (track_preload, update_loading_bar)
                    .chain()
                    .run_if(in_state(AppPhase::Loading)),
            );
    }
}

/// Completed-of-total counter. Never goes backwards, never passes the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadProgress {
    total: usize,
    completed: usize,
}

impl PreloadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
        }
    }

    /// Count one more resource as done, successful or not. Returns the new percentage.
    pub fn record_resolved(&mut self) -> u8 {
        self.completed = (self.completed + 1).min(self.total);
        self.percent()
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.completed as f64 / self.total as f64 * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// Handles for every preloaded image, keyed by asset path.
#[derive(Resource, Default)]
pub struct GameImages(HashMap<&'static str, Handle<Image>>);

impl GameImages {
    pub fn get(&self, path: &str) -> Handle<Image> {
        self.0.get(path).cloned().unwrap_or_default()
    }
}

/// What one pending image has come to. A failure is as final as a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Pending,
    Loaded,
    Failed,
}

#[derive(Resource)]
struct Preload {
    pending: Vec<(&'static str, Handle<Image>)>,
    progress: PreloadProgress,
    finished: bool,
}

impl Preload {
    fn new(pending: Vec<(&'static str, Handle<Image>)>) -> Self {
        Self {
            progress: PreloadProgress::new(pending.len()),
            pending,
            finished: false,
        }
    }

    /// Drop every resolved image from the pending list. Returns true on the one call
    /// that completes the preload, false before and after.
    fn resolve(&mut self, mut outcome: impl FnMut(&str, &Handle<Image>) -> Outcome) -> bool {
        let progress = &mut self.progress;
        self.pending.retain(|(path, handle)| match outcome(path, handle) {
            Outcome::Pending => true,
            Outcome::Loaded | Outcome::Failed => {
                progress.record_resolved();
                false
            }
        });

        if self.finished || !self.progress.is_complete() {
            return false;
        }
        self.finished = true;
        true
    }
}

#[derive(Component)]
struct LoadingBar;

#[derive(Component)]
struct LoadingLabel;

fn start_preload(mut commands: Commands, asset_server: Res<AssetServer>) {
    let mut images = GameImages::default();
    let mut pending = Vec::with_capacity(MANIFEST.len());
    for path in MANIFEST {
        let handle: Handle<Image> = asset_server.load(path);
        images.0.insert(path, handle.clone());
        pending.push((path, handle));
    }

    commands.insert_resource(images);
    commands.insert_resource(Preload::new(pending));
}

fn track_preload(
    mut preload: ResMut<Preload>,
    asset_server: Res<AssetServer>,
    mut next_phase: ResMut<NextState<AppPhase>>,
) {
    let done = preload.resolve(|path, handle| match asset_server.load_state(handle.id()) {
        LoadState::Loaded => Outcome::Loaded,
        LoadState::Failed(err) => {
            warn!("Could not load {path}: {err}");
            Outcome::Failed
        }
        LoadState::NotLoaded | LoadState::Loading => Outcome::Pending,
    });

    if done {
        info!("Preloaded {} images", MANIFEST.len());
        next_phase.set(AppPhase::Ready);
    }
}

fn spawn_loading_screen(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(crate::widgets::NIGHT_BLUE),
            DespawnOnExit(AppPhase::Loading),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading Resources..."),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            // Bar track.
            parent
                .spawn((
                    Node {
                        width: Val::Px(256.0),
                        height: Val::Px(16.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.25, 0.25, 0.3)),
                ))
                .with_children(|track| {
                    track.spawn((
                        LoadingBar,
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(crate::widgets::GOLD),
                    ));
                });

            parent.spawn((
                LoadingLabel,
                Text::new("0%"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
            ));
        });
}

fn update_loading_bar(
    preload: Res<Preload>,
    mut bars: Query<&mut Node, With<LoadingBar>>,
    mut labels: Query<&mut Text, With<LoadingLabel>>,
) {
    if !preload.is_changed() {
        return;
    }
    let percent = preload.progress.percent();
    for mut node in &mut bars {
        node.width = Val::Percent(percent as f32);
    }
    for mut text in &mut labels {
        **text = format!("{percent}%");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_rounds_to_whole_percent() {
        let mut progress = PreloadProgress::new(3);
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.record_resolved(), 33);
        assert_eq!(progress.record_resolved(), 67);
        assert_eq!(progress.record_resolved(), 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let total = MANIFEST.len();
        let mut progress = PreloadProgress::new(total);
        let mut last = progress.percent();
        for _ in 0..total {
            assert!(!progress.is_complete());
            let now = progress.record_resolved();
            assert!(now >= last);
            last = now;
        }
        assert_eq!(last, 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_extra_resolutions_do_not_overshoot() {
        let mut progress = PreloadProgress::new(2);
        progress.record_resolved();
        progress.record_resolved();
        assert_eq!(progress.record_resolved(), 100);
        assert!(progress.is_complete());
    }

    fn two_images() -> Preload {
        Preload::new(vec![
            ("images/ok.png", Handle::default()),
            ("images/missing.png", Handle::default()),
        ])
    }

    #[test]
    fn test_failed_image_counts_as_resolved() {
        let mut preload = two_images();

        let done = preload.resolve(|path, _| match path {
            "images/missing.png" => Outcome::Failed,
            _ => Outcome::Pending,
        });
        assert!(!done);
        assert_eq!(preload.progress.percent(), 50);
        assert_eq!(preload.pending.len(), 1);

        assert!(preload.resolve(|_, _| Outcome::Loaded));
        assert!(preload.pending.is_empty());
        assert_eq!(preload.progress.percent(), 100);
    }

    #[test]
    fn test_all_failures_still_complete() {
        let mut preload = two_images();
        assert!(preload.resolve(|_, _| Outcome::Failed));
        assert!(preload.progress.is_complete());
    }

    #[test]
    fn test_completion_is_reported_once() {
        let mut preload = two_images();
        assert!(preload.resolve(|_, _| Outcome::Loaded));
        assert!(!preload.resolve(|_, _| Outcome::Loaded));
        assert!(!preload.resolve(|_, _| Outcome::Failed));
    }

    #[test]
    fn test_nothing_resolves_while_loading() {
        let mut preload = two_images();
        for _ in 0..3 {
            assert!(!preload.resolve(|_, _| Outcome::Pending));
        }
        assert_eq!(preload.progress.percent(), 0);
        assert_eq!(preload.pending.len(), 2);
    }

    #[test]
    fn test_empty_manifest_is_complete_immediately() {
        let progress = PreloadProgress::new(0);
        assert!(progress.is_complete());
        assert_eq!(progress.percent(), 100);
    }
}
