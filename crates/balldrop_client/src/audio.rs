//! Hit sound playback
//!
//! Один переиспользуемый звук: новый удар перезапускает playback
//! (предыдущий player despawn'ится) с громкостью из HitSound события.

use bevy::audio::Volume;
use bevy::prelude::*;
use balldrop_simulation::HitSound;

const HIT_SOUND_PATH: &str = "sounds/hit.ogg";

pub struct HitSoundPlugin;

impl Plugin for HitSoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HitSoundEmitter>()
            .add_systems(Startup, load_hit_sound)
            .add_systems(Update, play_hit_sounds);
    }
}

#[derive(Resource)]
pub struct HitSoundClip(pub Handle<AudioSource>);

/// Текущий playback entity (None если ничего не играет или уже despawn'ился сам)
#[derive(Resource, Debug, Default)]
pub struct HitSoundEmitter {
    pub playing: Option<Entity>,
}

fn load_hit_sound(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(HitSoundClip(asset_server.load(HIT_SOUND_PATH)));
}

fn play_hit_sounds(
    mut commands: Commands,
    mut sounds: EventReader<HitSound>,
    clip: Res<HitSoundClip>,
    mut emitter: ResMut<HitSoundEmitter>,
) {
    for sound in sounds.read() {
        // Restart: старый playback обрывается
        if let Some(previous) = emitter.playing.take() {
            commands.entity(previous).try_despawn();
        }

        let player = commands
            .spawn((
                AudioPlayer::new(clip.0.clone()),
                PlaybackSettings::DESPAWN.with_volume(Volume::Linear(sound.volume)),
            ))
            .id();
        emitter.playing = Some(player);
    }
}
