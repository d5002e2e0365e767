//! Backdrop blur render feature.
//!
//! After a camera's main pass, the frame is downsampled into two scratch
//! targets and blurred by ping-ponging between them with a growing
//! kernel offset. The result is either resolved back into the camera
//! target or written into [`BlurTargetImage`], a UI-visible image that
//! backdrop nodes crop to their own screen rectangle for the frosted
//! glass look.

use bevy::{
    asset::embedded_asset,
    core_pipeline::{
        core_2d::graph::{Core2d, Node2d},
        core_3d::graph::{Core3d, Node3d},
    },
    ecs::query::QueryItem,
    picking::prelude::Pickable,
    prelude::*,
    render::{
        Render, RenderApp, RenderStartup, RenderSystems,
        camera::ExtractedCamera,
        extract_component::{ExtractComponent, ExtractComponentPlugin},
        extract_resource::{ExtractResource, ExtractResourcePlugin},
        render_asset::RenderAssets,
        render_graph::{
            NodeRunError, RenderGraphContext, RenderGraphExt, RenderLabel, ViewNode,
            ViewNodeRunner,
        },
        render_resource::{
            BindGroupEntries, BindGroupLayoutDescriptor, BindGroupLayoutEntries,
            BufferInitDescriptor, BufferUsages, CachedRenderPipelineId, ColorTargetState,
            ColorWrites, Extent3d, FragmentState, LoadOp, Operations, PipelineCache,
            RenderPassColorAttachment, RenderPassDescriptor, RenderPipelineDescriptor,
            Sampler, SamplerBindingType, SamplerDescriptor, ShaderStages, ShaderType, StoreOp,
            TextureDescriptor, TextureDimension, TextureFormat, TextureSampleType, TextureUsages,
            VertexState,
            binding_types::{sampler, texture_2d, uniform_buffer},
        },
        renderer::{RenderContext, RenderDevice},
        texture::{CachedTexture, GpuImage, TextureCache},
        view::ViewTarget,
    },
    ui::UiGlobalTransform,
    window::PrimaryWindow,
};

use crate::core::blur::{BlurSettings, backdrop_uv, pass_offsets, source_rect};

const SHADER_ASSET_PATH: &str = "embedded://waxwing/render/shaders/blur.wgsl";

pub struct BlurBackdropPlugin;

impl Plugin for BlurBackdropPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "shaders/blur.wgsl");

        app.add_plugins((
            ExtractComponentPlugin::<BlurBackdrop>::default(),
            ExtractResourcePlugin::<BlurTargetImage>::default(),
        ));

        app.add_systems(Startup, setup_blur_target).add_systems(
            Update,
            (resize_blur_target, sync_backdrop_rects),
        );

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app
            .add_systems(RenderStartup, init_blur_pipeline)
            .add_systems(
                Render,
                prepare_blur_scratch.in_set(RenderSystems::PrepareResources),
            );

        render_app
            .add_render_graph_node::<ViewNodeRunner<BlurPassNode>>(Core3d, BlurPassLabel)
            .add_render_graph_edges(Core3d, (Node3d::EndMainPass, BlurPassLabel, Node3d::Tonemapping))
            .add_render_graph_node::<ViewNodeRunner<BlurPassNode>>(Core2d, BlurPassLabel)
            .add_render_graph_edges(Core2d, (Node2d::EndMainPass, BlurPassLabel, Node2d::Tonemapping));
    }
}

/// Attach to a camera to blur its frame after the main pass.
#[derive(Component, Clone, ExtractComponent)]
pub struct BlurBackdrop {
    pub settings: BlurSettings,
}

impl BlurBackdrop {
    /// Settings are clamped at this boundary; the render node assumes
    /// they are in range.
    pub fn new(settings: BlurSettings) -> Self {
        Self {
            settings: settings.validated(),
        }
    }
}

impl Default for BlurBackdrop {
    fn default() -> Self {
        Self::new(BlurSettings::default())
    }
}

/// The UI-visible blurred frame, sized `window / downsample`.
#[derive(Resource, Clone, ExtractResource)]
pub struct BlurTargetImage {
    pub handle: Handle<Image>,
    pub size: UVec2,
}

/// UI node displaying the blurred frame cropped to its own screen
/// rectangle.
#[derive(Component)]
pub struct BlurBackdropNode;

/// Extra ancestor whose geometry changes must retrigger the crop.
/// Geometry events do not bubble down, so a panel moved by an animated
/// ancestor registers that ancestor here explicitly.
#[derive(Component)]
pub struct BackdropWatch(pub Entity);

pub fn blur_backdrop(target: &BlurTargetImage) -> impl Bundle {
    (
        BlurBackdropNode,
        Pickable::IGNORE,
        ImageNode::new(target.handle.clone()),
        ZIndex(-1),
        Node {
            position_type: PositionType::Absolute,
            width: percent(100),
            height: percent(100),
            ..default()
        },
    )
}

fn blank_target_image(size: UVec2) -> Image {
    let mut image = Image::new(
        Extent3d {
            width: size.x.max(1),
            height: size.y.max(1),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        vec![0; (size.x.max(1) * size.y.max(1) * 4) as usize],
        TextureFormat::Rgba8UnormSrgb,
        default(),
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING
        | TextureUsages::COPY_DST
        | TextureUsages::RENDER_ATTACHMENT;
    image
}

fn setup_blur_target(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let size = windows
        .single()
        .map(|w| w.physical_size() / BlurSettings::default().downsample)
        .unwrap_or(UVec2::new(640, 360));

    let handle = images.add(blank_target_image(size));
    commands.insert_resource(BlurTargetImage { handle, size });
}

fn resize_blur_target(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<&BlurBackdrop>,
    mut target: ResMut<BlurTargetImage>,
    mut images: ResMut<Assets<Image>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let downsample = cameras
        .iter()
        .next()
        .map(|b| b.settings.downsample)
        .unwrap_or(BlurSettings::default().downsample);

    let desired = (window.physical_size() / downsample).max(UVec2::ONE);
    if desired == target.size {
        return;
    }

    images.insert(target.handle.id(), blank_target_image(desired));
    target.size = desired;
}

/// Recomputes each backdrop node's source rectangle from its world
/// rectangle relative to the window. Runs on the node's own geometry or
/// transform change, on that of a watched ancestor, and on target
/// resize.
fn sync_backdrop_rects(
    mut nodes: Query<
        (
            Entity,
            &mut ImageNode,
            &ComputedNode,
            &UiGlobalTransform,
            Option<&BackdropWatch>,
        ),
        With<BlurBackdropNode>,
    >,
    changed: Query<(), Or<(Changed<ComputedNode>, Changed<UiGlobalTransform>)>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    target: Res<BlurTargetImage>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let root = Rect::from_corners(Vec2::ZERO, window.physical_size().as_vec2());
    if root.width() == 0.0 || root.height() == 0.0 {
        return;
    }

    for (entity, mut image, computed, transform, watch) in &mut nodes {
        let dirty = target.is_changed()
            || changed.contains(entity)
            || watch.is_some_and(|w| changed.contains(w.0));
        if !dirty {
            continue;
        }

        let size = computed.size();
        if size.x == 0.0 || size.y == 0.0 {
            continue;
        }

        let panel = Rect::from_center_size(transform.translation, size);
        let uv = backdrop_uv(panel, root);
        image.rect = Some(source_rect(uv, target.size.as_vec2()));
    }
}

// --- render world -----------------------------------------------------

#[derive(Debug, Hash, PartialEq, Eq, Clone, RenderLabel)]
pub struct BlurPassLabel;

#[derive(Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable, ShaderType)]
#[repr(C)]
struct BlurUniform {
    offset: f32,
    _padding: [f32; 3],
}

#[derive(Resource)]
struct BlurPipeline {
    layout: BindGroupLayoutDescriptor,
    sampler: Sampler,
    pipeline_ldr: CachedRenderPipelineId,
    pipeline_hdr: CachedRenderPipelineId,
}

fn init_blur_pipeline(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    pipeline_cache: Res<PipelineCache>,
    render_device: Res<RenderDevice>,
) {
    let layout = BindGroupLayoutDescriptor::new(
        "waxwing_blur_bind_group",
        &BindGroupLayoutEntries::sequential(
            ShaderStages::FRAGMENT,
            (
                texture_2d(TextureSampleType::Float { filterable: true }),
                sampler(SamplerBindingType::Filtering),
                uniform_buffer::<BlurUniform>(false),
            ),
        ),
    );

    let sampler = render_device.create_sampler(&SamplerDescriptor {
        label: Some("waxwing_blur_sampler"),
        address_mode_u: bevy::render::render_resource::AddressMode::ClampToEdge,
        address_mode_v: bevy::render::render_resource::AddressMode::ClampToEdge,
        mag_filter: bevy::render::render_resource::FilterMode::Linear,
        min_filter: bevy::render::render_resource::FilterMode::Linear,
        ..default()
    });

    let shader = asset_server.load(SHADER_ASSET_PATH);

    let queue = |format: TextureFormat| {
        pipeline_cache.queue_render_pipeline(RenderPipelineDescriptor {
            label: Some("waxwing_blur_pipeline".into()),
            layout: vec![layout.clone()],
            vertex: VertexState {
                shader: shader.clone(),
                entry_point: Some("vertex".into()),
                ..default()
            },
            fragment: Some(FragmentState {
                shader: shader.clone(),
                entry_point: Some("fragment".into()),
                targets: vec![Some(ColorTargetState {
                    format,
                    blend: None,
                    write_mask: ColorWrites::ALL,
                })],
                ..default()
            }),
            ..default()
        })
    };

    let pipeline_ldr = queue(TextureFormat::Rgba8UnormSrgb);
    let pipeline_hdr = queue(ViewTarget::TEXTURE_FORMAT_HDR);

    commands.insert_resource(BlurPipeline {
        layout,
        sampler,
        pipeline_ldr,
        pipeline_hdr,
    });
}

/// Ping/pong scratch targets plus the per-blit offset uniforms, rebuilt
/// each frame and owned by the node for its duration.
#[derive(Component)]
struct BlurScratch {
    ping: CachedTexture,
    pong: CachedTexture,
    uniforms: Vec<bevy::render::render_resource::Buffer>,
}

fn prepare_blur_scratch(
    mut commands: Commands,
    render_device: Res<RenderDevice>,
    mut texture_cache: ResMut<TextureCache>,
    views: Query<(Entity, &ExtractedCamera, &BlurBackdrop)>,
) {
    for (entity, camera, backdrop) in &views {
        let Some(size) = camera.physical_viewport_size else {
            continue;
        };
        let settings = &backdrop.settings;
        let scaled = (size / settings.downsample).max(UVec2::ONE);

        let descriptor = TextureDescriptor {
            label: Some("waxwing_blur_scratch"),
            size: Extent3d {
                width: scaled.x,
                height: scaled.y,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        };

        let ping = texture_cache.get(&render_device, descriptor.clone());
        let pong = texture_cache.get(&render_device, descriptor);

        let uniforms = pass_offsets(settings.passes)
            .into_iter()
            .map(|offset| {
                render_device.create_buffer_with_data(&BufferInitDescriptor {
                    label: Some("waxwing_blur_offset"),
                    contents: bytemuck::bytes_of(&BlurUniform {
                        offset,
                        _padding: [0.0; 3],
                    }),
                    usage: BufferUsages::UNIFORM,
                })
            })
            .collect();

        commands.entity(entity).insert(BlurScratch {
            ping,
            pong,
            uniforms,
        });
    }
}

#[derive(Default)]
struct BlurPassNode;

impl ViewNode for BlurPassNode {
    type ViewQuery = (
        &'static ViewTarget,
        &'static BlurBackdrop,
        &'static BlurScratch,
    );

    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        (view_target, backdrop, scratch): QueryItem<Self::ViewQuery>,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let pipeline_res = world.resource::<BlurPipeline>();
        let pipeline_cache = world.resource::<PipelineCache>();

        let Some(scratch_pipeline) =
            pipeline_cache.get_render_pipeline(pipeline_res.pipeline_ldr)
        else {
            return Ok(());
        };

        let settings = &backdrop.settings;
        let blit_count = scratch.uniforms.len();
        if blit_count < 2 {
            return Ok(());
        }

        let layout = pipeline_cache.get_bind_group_layout(&pipeline_res.layout);

        // Final destination: back into the camera target, or into the
        // UI-visible image under the configured slot name.
        let output_view = if settings.copy_to_framebuffer {
            None
        } else {
            let gpu_images = world.resource::<RenderAssets<GpuImage>>();
            let target = world.resource::<BlurTargetImage>();
            let Some(gpu_image) = gpu_images.get(&target.handle) else {
                return Ok(());
            };
            Some(gpu_image.texture_view.clone())
        };

        let post_process = settings.copy_to_framebuffer.then(|| view_target.post_process_write());

        let source_view = match &post_process {
            Some(post) => post.source.clone(),
            None => view_target.main_texture_view().clone(),
        };

        let mut read = &scratch.ping;
        let mut write = &scratch.pong;

        for (index, uniform) in scratch.uniforms.iter().enumerate() {
            let is_first = index == 0;
            let is_last = index == blit_count - 1;

            let input_view = if is_first {
                source_view.clone()
            } else {
                read.default_view.clone()
            };

            let (target_view, target_pipeline) = if is_last {
                match (&post_process, &output_view) {
                    (Some(post), _) => {
                        let id = if view_target.main_texture_format()
                            == ViewTarget::TEXTURE_FORMAT_HDR
                        {
                            pipeline_res.pipeline_hdr
                        } else {
                            pipeline_res.pipeline_ldr
                        };
                        let Some(pipeline) = pipeline_cache.get_render_pipeline(id) else {
                            return Ok(());
                        };
                        (post.destination.clone(), pipeline)
                    }
                    (None, Some(view)) => (view.clone(), scratch_pipeline),
                    (None, None) => return Ok(()),
                }
            } else {
                (write.default_view.clone(), scratch_pipeline)
            };

            let bind_group = render_context.render_device().create_bind_group(
                Some(settings.target_name.as_str()),
                &layout,
                &BindGroupEntries::sequential((
                    &input_view,
                    &pipeline_res.sampler,
                    uniform.as_entire_binding(),
                )),
            );

            let mut pass = render_context.begin_tracked_render_pass(RenderPassDescriptor {
                label: Some("waxwing_blur_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &target_view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(default()),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_render_pipeline(target_pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.draw(0..3, 0..1);

            drop(pass);
            std::mem::swap(&mut read, &mut write);
        }

        Ok(())
    }
}
