use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A uniform buffer holding one `T` and the bind group exposing it at
/// binding 0, optionally alongside other resources.
pub(crate) struct UniformBuffer<T> {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        initial: &T,
    ) -> Self {
        Self::with_resources(device, label, layout, initial, &[])
    }

    /// Like [`new`](Self::new), with `extra` entries (bindings 1 and up)
    /// added to the bind group.
    pub fn with_resources(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        initial: &T,
        extra: &[wgpu::BindGroupEntry<'_>],
    ) -> Self {
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(initial),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }];
        entries.extend_from_slice(extra);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &entries,
        });
        Self {
            buffer,
            bind_group,
            _marker: PhantomData,
        }
    }

    /// Upload a new value.
    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
